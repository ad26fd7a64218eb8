use crate::form;
use crate::input::Input;
use crate::progress::ProgressType;
use crate::render::{render_detail, render_help, render_list};
use application::{Applied, ApplicationError, Command, Controller, Outcome, View};
use catalog::{KeyValueStorage, SaveOutcome};
use console::style;
use domain::{Product, ProductDraft, ProductId};
use thiserror::Error;
use tokio::io::AsyncBufRead;
use tracing::{debug, warn};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this product?";

/// A product reference typed by the user: a 1-based list position or an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Index(usize),
    Id(String),
}

impl Target {
    pub fn parse(arg: &str) -> Self {
        match arg.parse::<usize>() {
            Ok(n) if n > 0 => Target::Index(n),
            _ => Target::Id(arg.to_string()),
        }
    }

    pub fn resolve<'a>(&self, products: &'a [Product]) -> Option<&'a Product> {
        match self {
            Target::Index(n) => n.checked_sub(1).and_then(|i| products.get(i)),
            Target::Id(id) => products.iter().find(|p| &p.id == id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Nothing,
    List,
    Show(Target),
    New,
    Edit(Option<Target>),
    Delete(Option<Target>),
    Copy,
    Analyze,
    Insights,
    Back,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown command '{0}'. Type 'help' for the list of commands.")]
    Unknown(String),

    #[error("'{0}' needs a product number or id")]
    MissingArgument(&'static str),

    #[error("'{0}' takes no arguments")]
    UnexpectedArgument(String),
}

pub fn parse_input(line: &str) -> Result<Intent, ParseError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Intent::Nothing);
    };
    let command = command.to_lowercase();
    let argument = words.next().map(Target::parse);
    if words.next().is_some() {
        return Err(ParseError::UnexpectedArgument(command));
    }

    let no_argument = |intent: Intent| match argument {
        Some(_) => Err(ParseError::UnexpectedArgument(command.clone())),
        None => Ok(intent),
    };

    match command.as_str() {
        "list" | "ls" => no_argument(Intent::List),
        "show" | "open" => argument
            .clone()
            .map(Intent::Show)
            .ok_or(ParseError::MissingArgument("show")),
        "new" | "add" => no_argument(Intent::New),
        "edit" => Ok(Intent::Edit(argument.clone())),
        "delete" | "rm" => Ok(Intent::Delete(argument.clone())),
        "copy" => no_argument(Intent::Copy),
        "analyze" => no_argument(Intent::Analyze),
        "insights" => no_argument(Intent::Insights),
        "back" => no_argument(Intent::Back),
        "help" | "?" => no_argument(Intent::Help),
        "quit" | "exit" | "q" => no_argument(Intent::Quit),
        _ => Err(ParseError::Unknown(command.clone())),
    }
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error("{0}")]
    Usage(String),

    /// Terminal I/O failed; ends the session
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

enum Flow {
    Continue,
    Quit,
}

/// Read-eval loop over the controller
pub struct Shell<S, R> {
    controller: Controller<S>,
    input: Input<R>,
}

impl<S, R> Shell<S, R>
where
    S: KeyValueStorage,
    R: AsyncBufRead + Unpin,
{
    pub fn new(controller: Controller<S>, input: Input<R>) -> Self {
        Self { controller, input }
    }

    pub fn controller(&self) -> &Controller<S> {
        &self.controller
    }

    pub fn into_controller(self) -> Controller<S> {
        self.controller
    }

    pub async fn run(&mut self) -> Result<(), ShellError> {
        print!("{}", render_list(self.controller.products()));
        println!("{}", style("Type 'help' for commands.").dim());

        loop {
            let Some(line) = self.input.prompt(&self.prompt_label()).await? else {
                break;
            };

            let result = match parse_input(&line) {
                Ok(intent) => self.handle(intent).await,
                Err(e) => Err(e.into()),
            };

            match result {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(ShellError::Io(e)) => return Err(ShellError::Io(e)),
                Err(e) => println!("{} {e}", style("Error:").red().bold()),
            }
        }

        debug!("Shell finished");
        Ok(())
    }

    fn prompt_label(&self) -> String {
        match self.controller.detail() {
            Some(detail) => format!("{} > ", style(&detail.product.name).cyan()),
            None => "> ".to_string(),
        }
    }

    async fn handle(&mut self, intent: Intent) -> Result<Flow, ShellError> {
        match intent {
            Intent::Nothing => {}
            Intent::List => {
                if self.controller.state().view == View::Detail {
                    self.controller.dispatch(Command::Back)?;
                }
                print!("{}", render_list(self.controller.products()));
            }
            Intent::Show(target) => {
                let id = self.resolve(&target)?;
                self.controller.dispatch(Command::Select(id))?;
                self.show_detail();
            }
            Intent::New => {
                self.controller.dispatch(Command::OpenForm(None))?;
                self.run_form(ProductDraft::new()).await?;
            }
            Intent::Edit(target) => {
                let id = self.resolve_or_selected(target.as_ref(), "edit")?;
                self.controller.dispatch(Command::OpenForm(Some(id)))?;
                let draft = self
                    .controller
                    .state()
                    .form
                    .editing()
                    .map(ProductDraft::from_product)
                    .unwrap_or_default();
                self.run_form(draft).await?;
            }
            Intent::Delete(target) => {
                let id = self.resolve_or_selected(target.as_ref(), "delete")?;
                self.delete(id).await?;
            }
            Intent::Copy => {
                self.require_detail()?;
                let spinner = ProgressType::MarketingCopy.create_spinner();
                match self.controller.generate_marketing_copy().await {
                    Ok(_) => spinner.finish_success("Marketing copy ready"),
                    Err(e) => spinner.finish_error(&e.to_string()),
                }
                self.show_detail();
            }
            Intent::Analyze => {
                self.require_detail()?;
                let spinner = ProgressType::Analysis.create_spinner();
                match self.controller.analyze_content().await {
                    Ok(_) => spinner.finish_success("Analysis ready"),
                    Err(e) => spinner.finish_error(&e.to_string()),
                }
                self.show_detail();
            }
            Intent::Insights => self.insights().await?,
            Intent::Back => {
                self.controller.dispatch(Command::Back)?;
                print!("{}", render_list(self.controller.products()));
            }
            Intent::Help => print!("{}", render_help()),
            Intent::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn show_detail(&self) {
        match self.controller.detail() {
            Some(detail) => print!("{}", render_detail(&detail)),
            // The selection no longer resolves, fall back to the list
            None => print!("{}", render_list(self.controller.products())),
        }
    }

    fn require_detail(&self) -> Result<(), ShellError> {
        match self.controller.detail() {
            Some(_) => Ok(()),
            None => Err(ApplicationError::NoDetailView.into()),
        }
    }

    fn resolve(&self, target: &Target) -> Result<ProductId, ShellError> {
        target
            .resolve(self.controller.products())
            .map(|p| p.id.clone())
            .ok_or_else(|| ShellError::Usage("No product matches that number or id".to_string()))
    }

    fn resolve_or_selected(
        &self,
        target: Option<&Target>,
        command: &'static str,
    ) -> Result<ProductId, ShellError> {
        match target {
            Some(target) => self.resolve(target),
            None => self
                .controller
                .selected_product()
                .map(|p| p.id.clone())
                .ok_or(ShellError::Parse(ParseError::MissingArgument(command))),
        }
    }

    async fn run_form(&mut self, mut draft: ProductDraft) -> Result<(), ShellError> {
        loop {
            let filled = match form::fill(&mut self.input, &self.controller, draft).await? {
                Some(filled) => filled,
                None => {
                    self.controller.dispatch(Command::CloseForm)?;
                    println!("{}", style("Form closed without saving.").dim());
                    return Ok(());
                }
            };

            match self.controller.dispatch(Command::Save(filled.clone())) {
                Ok(Outcome::Saved {
                    product,
                    persistence,
                }) => {
                    println!("{} {}", style("Saved").green().bold(), product.name);
                    report_persistence(&persistence);
                    self.show_detail_or_list();
                    return Ok(());
                }
                Ok(_) => return Ok(()),
                Err(ApplicationError::Validation(e)) => {
                    println!("{} {e}", style("Error:").red().bold());
                    draft = filled;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn show_detail_or_list(&self) {
        if self.controller.state().view == View::Detail {
            self.show_detail();
        } else {
            print!("{}", render_list(self.controller.products()));
        }
    }

    async fn delete(&mut self, id: ProductId) -> Result<(), ShellError> {
        self.controller.dispatch(Command::Delete(id))?;

        if self.input.confirm(DELETE_CONFIRMATION).await? {
            if let Outcome::Deleted { persistence, .. } =
                self.controller.dispatch(Command::ConfirmDelete)?
            {
                println!("{}", style("Deleted.").green());
                report_persistence(&persistence);
            }
        } else {
            self.controller.dispatch(Command::CancelDelete)?;
            println!("{}", style("Kept.").dim());
        }

        self.show_detail_or_list();
        Ok(())
    }

    async fn insights(&mut self) -> Result<(), ShellError> {
        let copy_ticket = self.controller.begin_marketing_copy()?;
        let analysis_ticket = self.controller.begin_analysis()?;
        let generator = self.controller.generator();

        let spinner = ProgressType::Insights.create_spinner();
        let (copy, analysis) = tokio::join!(
            generator.generate_marketing_copy(&copy_ticket.product),
            generator.analyze_content(&analysis_ticket.product.description),
        );

        if copy.is_ok() && analysis.is_ok() {
            spinner.finish_success("Insights ready");
        } else {
            spinner.finish_error("Some insights could not be generated");
        }

        let applied = [
            ("marketing_copy", self.controller.finish_marketing_copy(copy_ticket, copy)),
            ("analysis", self.controller.finish_analysis(analysis_ticket, analysis)),
        ];
        for (slot, outcome) in applied {
            if outcome == Applied::Discarded {
                debug!(slot, "Insight arrived after the view changed, discarded");
            }
        }

        self.show_detail();
        Ok(())
    }
}

fn report_persistence(outcome: &SaveOutcome) {
    match outcome {
        SaveOutcome::Persisted => {}
        SaveOutcome::NotLoaded => {
            warn!("Catalog was not loaded; change kept in memory only");
        }
        SaveOutcome::Failed(reason) => println!(
            "{} changes could not be written to disk: {reason}",
            style("Warning:").yellow().bold()
        ),
    }
}
