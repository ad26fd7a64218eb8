//! Text rendering of the list and detail views
//!
//! Every function returns a `String` so the shell decides where it goes.

use application::{DetailView, ResultSlot};
use console::style;
use domain::entities::product::{DETAIL_IMAGE_SIZE, LIST_IMAGE_SIZE};
use domain::{ContentAnalysis, MarketingCopy, Product, ProductStatus};
use std::fmt::Write;

pub const EMPTY_CATALOG: &str = "No products yet.";

fn status_badge(status: ProductStatus) -> String {
    let label = format!("[{}]", status.as_str());
    match status {
        ProductStatus::Published => style(label).green().to_string(),
        ProductStatus::Draft => style(label).yellow().to_string(),
        ProductStatus::Archived => style(label).dim().to_string(),
    }
}

pub fn render_list(products: &[Product]) -> String {
    if products.is_empty() {
        return format!("{}\n", style(EMPTY_CATALOG).dim());
    }

    let mut out = String::new();
    for (index, product) in products.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} {} {} {}",
            index + 1,
            style(&product.name).bold(),
            style(&product.category).dim(),
            style(product.formatted_price()).cyan(),
            status_badge(product.status),
        );
        let _ = writeln!(
            out,
            "     {}",
            style(product.image_url_or_placeholder(LIST_IMAGE_SIZE)).dim()
        );
    }
    out
}

pub fn render_detail(detail: &DetailView<'_>) -> String {
    let product = detail.product;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}",
        style(&product.name).bold().underlined(),
        status_badge(product.status)
    );
    let _ = writeln!(
        out,
        "{} · {} · added {}",
        product.category,
        style(product.formatted_price()).cyan(),
        product.created_at.format("%b %-d, %Y")
    );
    let _ = writeln!(
        out,
        "{}",
        style(product.image_url_or_placeholder(DETAIL_IMAGE_SIZE)).dim()
    );
    let _ = writeln!(out);
    if product.description.trim().is_empty() {
        let _ = writeln!(out, "{}", style("(no description)").dim());
    } else {
        let _ = writeln!(out, "{}", product.description);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", style("Marketing copy").bold());
    out.push_str(&render_slot(detail.marketing_copy, "copy", render_marketing_copy));

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", style("Content analysis").bold());
    out.push_str(&render_slot(detail.analysis, "analyze", render_analysis));

    out
}

fn render_slot<T>(slot: &ResultSlot<T>, command: &str, render: fn(&T) -> String) -> String {
    match slot {
        ResultSlot::Empty => format!(
            "  {}\n",
            style(format!("Type `{command}` to generate.")).dim()
        ),
        ResultSlot::Pending(_) => format!("  {}\n", style("Generating...").dim()),
        ResultSlot::Ready(value) => render(value),
        ResultSlot::Failed(message) => {
            format!("  {} {}\n", style("Failed:").red().bold(), message)
        }
    }
}

pub fn render_marketing_copy(copy: &MarketingCopy) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {} {}", style("Headline:").dim(), copy.ad_headline);
    let _ = writeln!(out, "  {} {}", style("Ad body:").dim(), copy.ad_body);
    let _ = writeln!(out, "  {} {}", style("Social:").dim(), copy.social_media_post);
    out
}

pub fn render_analysis(analysis: &ContentAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {} {}", style("Tone:").dim(), analysis.tone);
    let _ = writeln!(
        out,
        "  {} {}/10",
        style("Clarity:").dim(),
        analysis.clarity_score
    );
    let _ = writeln!(out, "  {}", style("Suggestions:").dim());
    for suggestion in &analysis.suggestions {
        let _ = writeln!(out, "    - {suggestion}");
    }
    out
}

pub fn render_help() -> String {
    let commands = [
        ("list", "Show all products"),
        ("show <n|id>", "Open a product"),
        ("new", "Create a product"),
        ("edit [n|id]", "Edit a product (the open one by default)"),
        ("delete [n|id]", "Delete a product (the open one by default)"),
        ("copy", "Generate marketing copy for the open product"),
        ("analyze", "Analyze the open product's description"),
        ("insights", "Generate copy and analysis together"),
        ("back", "Return to the list"),
        ("help", "Show this help"),
        ("quit", "Exit"),
    ];

    let mut out = String::new();
    for (command, about) in commands {
        let _ = writeln!(out, "  {:<15} {}", style(command).cyan(), about);
    }
    out
}
