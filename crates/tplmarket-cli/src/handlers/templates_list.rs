use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use tplmarket_runtime::{Config, InitOutcome};
use tplmarket_store::{ObjectStorage, RemoteStore};
use tplmarket_types::{SortKey, Template};

use super::{controller, drain_warnings};

#[allow(clippy::too_many_arguments)]
pub fn handle(
    store: Arc<dyn RemoteStore>,
    storage: Arc<dyn ObjectStorage>,
    config: &Config,
    data_dir: &Path,
    user: Option<String>,
    industries: Vec<String>,
    formats: Vec<String>,
    languages: Vec<String>,
    sort: SortKey,
    pages: usize,
) -> Result<()> {
    let mut controller = controller(store, storage, config, data_dir, user.as_deref())?;

    if controller.init()? == InitOutcome::Redirect {
        println!("Not signed in. Pass --user <id> to browse templates.");
        return Ok(());
    }

    for industry in industries {
        controller.toggle_industry(industry);
    }
    for format in formats {
        controller.toggle_format(format);
    }
    for language in languages {
        controller.toggle_language(language);
    }
    controller.set_sort(sort);

    for _ in 1..pages.max(1) {
        controller.load_more();
    }

    let total = controller.derived().len();
    let visible = controller.visible();

    if visible.is_empty() {
        println!("No templates found");
    } else {
        for template in &visible {
            print_row(template, controller.is_saved(&template.id));
        }
        let remaining = total - visible.len();
        if remaining > 0 {
            println!("... {} more (use --pages to reveal)", remaining);
        }
        println!("{} of {} templates", visible.len(), total);
    }

    drain_warnings(&mut controller);
    controller.shutdown();
    Ok(())
}

fn print_row(template: &Template, saved: bool) {
    let marker = if saved { "*" } else { " " };
    println!(
        "{} {}  {}  [{}/{}/{}]  saves {}",
        marker,
        template.id,
        template.title,
        template.category,
        template.format,
        template.language,
        template.saved_count,
    );
}
