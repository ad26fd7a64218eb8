use crate::commands::{Command, Outcome};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::session::{Applied, DetailSession, GenerationTicket, ResultSlot, SlotKind};
use crate::state::{View, ViewState};
use catalog::{KeyValueStorage, ProductStore};
use domain::{ContentAnalysis, MarketingCopy, Product, ProductDraft, ProductId};
use llm::{AiGenerationError, ContentGenerator};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What the detail view renders
#[derive(Debug, Clone, Copy)]
pub struct DetailView<'a> {
    pub product: &'a Product,
    pub marketing_copy: &'a ResultSlot<MarketingCopy>,
    pub analysis: &'a ResultSlot<ContentAnalysis>,
}

/// Root state machine of the catalog UI.
///
/// Mutations go through [`Controller::dispatch`]. AI generation is split
/// into `begin_*` / `finish_*` so the caller can await the network without
/// holding the controller, and late responses are dropped instead of being
/// shown against a different product.
pub struct Controller<S> {
    store: ProductStore<S>,
    state: ViewState,
    pending_delete: Option<ProductId>,
    session: Option<DetailSession>,
    next_id: u64,
    generator: Arc<dyn ContentGenerator>,
}

impl<S: KeyValueStorage> Controller<S> {
    pub fn new(store: ProductStore<S>, generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            store,
            state: ViewState::default(),
            pending_delete: None,
            session: None,
            next_id: 0,
            generator,
        }
    }

    /// Load the catalog from storage, seeding it when absent or unreadable
    pub fn load(&mut self) -> &[Product] {
        self.store.load()
    }

    pub fn dispatch(&mut self, command: Command) -> ApplicationResult<Outcome> {
        debug!(?command, "Dispatching command");

        match command {
            Command::Select(id) => {
                if self.store.get(&id).is_none() {
                    return Err(ApplicationError::NotFound(id));
                }
                self.transition(|state| state.select(id.clone()));
                self.start_session(id);
                Ok(Outcome::Updated)
            }
            Command::Back => {
                self.leave_detail();
                Ok(Outcome::Updated)
            }
            Command::OpenForm(target) => {
                let editing = match target {
                    Some(id) => Some(
                        self.store
                            .get(&id)
                            .cloned()
                            .ok_or(ApplicationError::NotFound(id))?,
                    ),
                    None => None,
                };
                self.transition(|state| state.open_form(editing));
                Ok(Outcome::Updated)
            }
            Command::CloseForm => {
                self.transition(ViewState::close_form);
                Ok(Outcome::Updated)
            }
            Command::Save(draft) => {
                // A validation error leaves the form open with the draft intact
                let product = draft.into_product()?;
                let persistence = self.store.upsert(product.clone());
                self.transition(ViewState::close_form);
                Ok(Outcome::Saved {
                    product,
                    persistence,
                })
            }
            Command::Delete(id) => {
                self.pending_delete = Some(id.clone());
                Ok(Outcome::ConfirmationRequired { product_id: id })
            }
            Command::ConfirmDelete => {
                let id = self
                    .pending_delete
                    .take()
                    .ok_or(ApplicationError::NoPendingDeletion)?;
                let persistence = self.store.remove(&id);
                if self.state.selected_product_id.as_deref() == Some(id.as_str()) {
                    self.leave_detail();
                }
                Ok(Outcome::Deleted {
                    product_id: id,
                    persistence,
                })
            }
            Command::CancelDelete => match self.pending_delete.take() {
                Some(id) => {
                    debug!(product_id = %id, "Deletion cancelled");
                    Ok(Outcome::Cancelled)
                }
                None => Err(ApplicationError::NoPendingDeletion),
            },
        }
    }

    fn transition(&mut self, f: impl FnOnce(ViewState) -> ViewState) {
        self.state = f(std::mem::take(&mut self.state));
    }

    fn start_session(&mut self, product_id: ProductId) {
        let id = self.allocate_id();
        debug!(session = id, product_id = %product_id, "Detail session started");
        self.session = Some(DetailSession::new(id, product_id));
    }

    fn leave_detail(&mut self) {
        self.transition(ViewState::back);
        self.session = None;
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn products(&self) -> &[Product] {
        self.store.products()
    }

    pub fn store(&self) -> &ProductStore<S> {
        &self.store
    }

    /// `None` when the selection no longer resolves to a stored product
    pub fn selected_product(&self) -> Option<&Product> {
        self.state
            .selected_product_id
            .as_deref()
            .and_then(|id| self.store.get(id))
    }

    /// The detail view, or `None` when there is nothing valid to show
    pub fn detail(&self) -> Option<DetailView<'_>> {
        if self.state.view != View::Detail {
            return None;
        }
        let product = self.selected_product()?;
        let session = self.session.as_ref()?;
        Some(DetailView {
            product,
            marketing_copy: &session.marketing_copy,
            analysis: &session.analysis,
        })
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn generator(&self) -> Arc<dyn ContentGenerator> {
        Arc::clone(&self.generator)
    }

    /// Generate a description for the form's current name and category
    pub async fn describe(&self, draft: &ProductDraft) -> ApplicationResult<String> {
        draft.ensure_describable()?;
        Ok(self
            .generator
            .generate_description(draft.name.trim(), draft.category.trim())
            .await)
    }

    pub fn begin_marketing_copy(&mut self) -> ApplicationResult<GenerationTicket> {
        self.begin(SlotKind::MarketingCopy)
    }

    pub fn begin_analysis(&mut self) -> ApplicationResult<GenerationTicket> {
        self.begin(SlotKind::Analysis)
    }

    fn begin(&mut self, kind: SlotKind) -> ApplicationResult<GenerationTicket> {
        let product = self
            .detail()
            .map(|detail| detail.product.clone())
            .ok_or(ApplicationError::NoDetailView)?;
        let request_id = self.allocate_id();
        let session = self.session.as_mut().ok_or(ApplicationError::NoDetailView)?;

        match kind {
            SlotKind::MarketingCopy => session.marketing_copy = ResultSlot::Pending(request_id),
            SlotKind::Analysis => session.analysis = ResultSlot::Pending(request_id),
        }
        info!(product_id = %product.id, ?kind, request_id, "Generation started");

        Ok(GenerationTicket {
            session_id: session.id,
            request_id,
            kind,
            product,
        })
    }

    pub fn finish_marketing_copy(
        &mut self,
        ticket: GenerationTicket,
        result: Result<MarketingCopy, AiGenerationError>,
    ) -> Applied {
        let Some(session) = self.session_for(&ticket, SlotKind::MarketingCopy) else {
            return Applied::Discarded;
        };
        if session.marketing_copy != ResultSlot::Pending(ticket.request_id) {
            debug!(request_id = ticket.request_id, "Superseded marketing copy discarded");
            return Applied::Discarded;
        }
        session.marketing_copy = into_slot(result);
        Applied::Applied
    }

    pub fn finish_analysis(
        &mut self,
        ticket: GenerationTicket,
        result: Result<ContentAnalysis, AiGenerationError>,
    ) -> Applied {
        let Some(session) = self.session_for(&ticket, SlotKind::Analysis) else {
            return Applied::Discarded;
        };
        if session.analysis != ResultSlot::Pending(ticket.request_id) {
            debug!(request_id = ticket.request_id, "Superseded analysis discarded");
            return Applied::Discarded;
        }
        session.analysis = into_slot(result);
        Applied::Applied
    }

    fn session_for(&mut self, ticket: &GenerationTicket, kind: SlotKind) -> Option<&mut DetailSession> {
        if ticket.kind != kind {
            warn!(expected = ?kind, got = ?ticket.kind, "Ticket used for the wrong result");
            return None;
        }
        match self.session.as_mut() {
            Some(session) if session.id == ticket.session_id => Some(session),
            _ => {
                debug!(
                    product_id = %ticket.product.id,
                    ?kind,
                    "Detail view changed, discarding late response"
                );
                None
            }
        }
    }

    /// Begin, await and apply a marketing copy request in one step
    pub async fn generate_marketing_copy(&mut self) -> ApplicationResult<MarketingCopy> {
        let ticket = self.begin_marketing_copy()?;
        let result = self.generator.generate_marketing_copy(&ticket.product).await;
        match self.finish_marketing_copy(ticket, result.clone()) {
            Applied::Applied => result.map_err(ApplicationError::from),
            Applied::Discarded => Err(ApplicationError::StaleResponse),
        }
    }

    /// Begin, await and apply a content analysis in one step
    pub async fn analyze_content(&mut self) -> ApplicationResult<ContentAnalysis> {
        let ticket = self.begin_analysis()?;
        let result = self.generator.analyze_content(&ticket.product.description).await;
        match self.finish_analysis(ticket, result.clone()) {
            Applied::Applied => result.map_err(ApplicationError::from),
            Applied::Discarded => Err(ApplicationError::StaleResponse),
        }
    }
}

fn into_slot<T>(result: Result<T, AiGenerationError>) -> ResultSlot<T> {
    match result {
        Ok(value) => ResultSlot::Ready(value),
        Err(e) => {
            warn!(error = %e, "Generation failed");
            ResultSlot::Failed(e.to_string())
        }
    }
}
