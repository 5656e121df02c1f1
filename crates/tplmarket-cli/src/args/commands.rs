use clap::Subcommand;

use tplmarket_types::SortKey;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Delete all templates and insert the bootstrap fixture set")]
    Seed,

    #[command(about = "Browse catalog templates")]
    Templates {
        #[command(subcommand)]
        command: TemplatesCommand,
    },

    #[command(about = "Manage your saved templates")]
    Saved {
        #[command(subcommand)]
        command: SavedCommand,
    },
}

#[derive(Subcommand)]
pub enum TemplatesCommand {
    #[command(about = "List templates with filters and sorting")]
    List {
        /// Sign in as this user id; omit to browse signed out
        #[arg(long)]
        user: Option<String>,

        /// Industry filter, repeatable (DRINK, FOOD, FASHION, BEAUTY, HEALTH)
        #[arg(long)]
        industry: Vec<String>,

        /// Format filter, repeatable (Feed, Story)
        #[arg(long)]
        format: Vec<String>,

        /// Language filter, repeatable (LT, EN)
        #[arg(long)]
        language: Vec<String>,

        #[arg(long, default_value = "popular", value_parser = parse_sort_key)]
        sort: SortKey,

        /// How many 20-row pages to reveal
        #[arg(long, default_value = "1")]
        pages: usize,
    },
}

#[derive(Subcommand)]
pub enum SavedCommand {
    #[command(about = "List templates you have saved, most recent first")]
    List {
        #[arg(long)]
        user: String,
    },

    #[command(about = "Save or unsave one template")]
    Toggle {
        #[arg(long)]
        user: String,

        template_id: String,
    },
}

fn parse_sort_key(raw: &str) -> Result<SortKey, tplmarket_types::Error> {
    raw.parse()
}
