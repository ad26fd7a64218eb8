//! Field-by-field product form

use crate::input::Input;
use crate::progress::ProgressType;
use application::{ApplicationError, Controller};
use catalog::KeyValueStorage;
use console::style;
use domain::{ProductDraft, ProductStatus};
use std::io;
use tokio::io::AsyncBufRead;

/// Typed at the description prompt to ask the AI for a description
pub const GENERATE_KEYWORD: &str = "ai";
/// Typed at an optional field to clear it
pub const CLEAR_KEYWORD: &str = "-";

fn label(name: &str, current: &str) -> String {
    if current.is_empty() {
        format!("{name}: ")
    } else {
        format!("{name} [{}]: ", style(current).dim())
    }
}

/// Walk through every field, starting from `draft`.
///
/// Enter keeps the current value. Returns `None` if input ends first.
pub async fn fill<S, R>(
    input: &mut Input<R>,
    controller: &Controller<S>,
    mut draft: ProductDraft,
) -> io::Result<Option<ProductDraft>>
where
    S: KeyValueStorage,
    R: AsyncBufRead + Unpin,
{
    let Some(name) = input.prompt(&label("Name", &draft.name)).await? else {
        return Ok(None);
    };
    if !name.is_empty() {
        draft.name = name;
    }

    let Some(category) = input.prompt(&label("Category", &draft.category)).await? else {
        return Ok(None);
    };
    if !category.is_empty() {
        draft.category = category;
    }

    if !fill_description(input, controller, &mut draft).await? {
        return Ok(None);
    }

    loop {
        let current = format!("{:.2}", draft.price);
        let Some(price) = input.prompt(&label("Price", &current)).await? else {
            return Ok(None);
        };
        if price.is_empty() {
            break;
        }
        match price.trim_start_matches('$').parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => {
                draft.price = value;
                break;
            }
            _ => println!("{}", style("Enter a non-negative number, e.g. 19.99").red()),
        }
    }

    loop {
        let choices = ProductStatus::ALL.map(|s| s.as_str()).join("/");
        let Some(status) = input
            .prompt(&label(&format!("Status ({choices})"), draft.status.as_str()))
            .await?
        else {
            return Ok(None);
        };
        if status.is_empty() {
            break;
        }
        match status.parse::<ProductStatus>() {
            Ok(value) => {
                draft.status = value;
                break;
            }
            Err(e) => println!("{}", style(e).red()),
        }
    }

    let Some(image_url) = input.prompt(&label("Image URL", &draft.image_url)).await? else {
        return Ok(None);
    };
    if image_url == CLEAR_KEYWORD {
        draft.image_url.clear();
    } else if !image_url.is_empty() {
        draft.image_url = image_url;
    }

    Ok(Some(draft))
}

/// Returns `false` if input ended
async fn fill_description<S, R>(
    input: &mut Input<R>,
    controller: &Controller<S>,
    draft: &mut ProductDraft,
) -> io::Result<bool>
where
    S: KeyValueStorage,
    R: AsyncBufRead + Unpin,
{
    loop {
        if !draft.description.is_empty() {
            println!("{}", style(&draft.description).italic());
        }
        let hint = format!(
            "Description (Enter keeps, '{GENERATE_KEYWORD}' generates, '{CLEAR_KEYWORD}' clears): "
        );
        let Some(answer) = input.prompt(&hint).await? else {
            return Ok(false);
        };

        match answer.as_str() {
            "" => return Ok(true),
            CLEAR_KEYWORD => draft.description.clear(),
            GENERATE_KEYWORD => {
                let spinner = ProgressType::Description.create_spinner();
                match controller.describe(draft).await {
                    Ok(text) => {
                        spinner.finish_and_clear();
                        draft.description = text;
                    }
                    Err(ApplicationError::Validation(e)) => {
                        spinner.finish_and_clear();
                        println!("{}", style(e).red());
                    }
                    Err(e) => spinner.finish_error(&e.to_string()),
                }
            }
            text => {
                draft.description = text.to_string();
                return Ok(true);
            }
        }
    }
}
