//! Stockdash CLI
//!
//! Operator commands against the menu resource:
//! - List the menu tree
//! - Preview the sidebar for a route
//! - Add, edit and delete menu items
//! - Look up stock quotes and price history
//! - Generate a config file

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use stockdash::config::{generate_default_config, Config};
use stockdash::menu::{
    AdminController, ClickOutcome, DeleteOutcome, SidebarModel, SubmitOutcome,
};
use stockdash::gateway::DEFAULT_CHART_DAYS;
use stockdash::{HttpGateway, MenuGateway, StockGateway};

#[derive(Parser)]
#[command(name = "stockdash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage the navigation menu of the stock dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token (overrides config)
    #[arg(long, global = true)]
    pub token: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Menu tree operations
    Menus {
        #[command(subcommand)]
        command: MenuCommands,
    },

    /// Stock-data lookups
    Stock {
        #[command(subcommand)]
        command: StockCommands,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum MenuCommands {
    /// List every menu item, depth-indented
    List,

    /// Show the sidebar as it renders for a route
    Sidebar {
        /// Current route
        #[arg(short, long, default_value = "/dashboard")]
        path: String,
        /// Render the collapsed sidebar
        #[arg(long)]
        collapsed: bool,
        /// Click rows by id before rendering (repeatable)
        #[arg(long = "click")]
        clicks: Vec<String>,
    },

    /// Add a menu item
    Add {
        #[command(flatten)]
        fields: MenuFields,
    },

    /// Edit a menu item; omitted fields keep their current value
    Edit {
        /// Menu item id
        id: String,
        #[command(flatten)]
        fields: MenuFields,
        /// Move the item to the top level
        #[arg(long, conflicts_with = "parent")]
        root: bool,
        /// Active flag
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a menu item and its subtree
    Delete {
        /// Menu item id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum StockCommands {
    /// Current quote
    Price {
        /// Stock code
        code: String,
    },

    /// Daily prices
    Chart {
        /// Stock code
        code: String,
        /// Number of days
        #[arg(short, long, default_value_t = DEFAULT_CHART_DAYS)]
        days: u32,
    },
}

#[derive(Args)]
pub struct MenuFields {
    #[arg(long)]
    pub label: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub path: Option<String>,
    /// Parent item id
    #[arg(long)]
    pub parent: Option<String>,
    /// Sort order among siblings
    #[arg(long, allow_negative_numbers = true)]
    pub order: Option<i32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.client.base_url = base_url;
    }
    if let Some(token) = cli.token {
        config.client.token = Some(token);
    }
    stockdash::logging::init(&config.logging)?;

    match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
        Commands::Menus { command } => {
            let gateway = HttpGateway::new(&config.client)?;
            run_menus(command, gateway, &config).await?;
        }
        Commands::Stock { command } => {
            let gateway = HttpGateway::new(&config.client)?;
            run_stock(command, &gateway).await?;
        }
    }

    Ok(())
}

async fn run_menus(command: MenuCommands, gateway: HttpGateway, config: &Config) -> anyhow::Result<()> {
    match command {
        MenuCommands::Sidebar {
            path,
            collapsed,
            clicks,
        } => show_sidebar(&gateway, config, path, collapsed, &clicks).await?,
        MenuCommands::List => {
            let controller = load_controller(gateway, config).await?;
            print_list(&controller);
        }
        MenuCommands::Add { fields } => {
            let mut controller = load_controller(gateway, config).await?;
            controller.screen_mut().open_create()?;
            apply_fields(controller.screen_mut().form_mut(), fields);
            report_submit(controller.submit().await?)?;
        }
        MenuCommands::Edit {
            id,
            fields,
            root,
            active,
        } => {
            let mut controller = load_controller(gateway, config).await?;
            controller.screen_mut().open_edit(&id)?;
            let form = controller.screen_mut().form_mut();
            apply_fields(form, fields);
            if root {
                form.set_parent_input("");
            }
            if let Some(active) = active {
                form.is_active = active;
            }
            report_submit(controller.submit().await?)?;
        }
        MenuCommands::Delete { id, yes } => {
            let mut controller = load_controller(gateway, config).await?;
            let confirm = |prompt: &str| yes || ask(prompt);
            match controller.delete(&id, &confirm).await? {
                DeleteOutcome::Deleted => println!("Deleted menu item {}", id),
                DeleteOutcome::Cancelled => println!("Cancelled"),
                DeleteOutcome::Failed(message) => bail!(message),
                DeleteOutcome::Stale => {}
            }
        }
    }

    Ok(())
}

async fn run_stock(command: StockCommands, gateway: &HttpGateway) -> anyhow::Result<()> {
    match command {
        StockCommands::Price { code } => {
            let quote = gateway.price(&code).await?;
            let direction = if quote.is_up {
                "▲"
            } else if quote.is_down {
                "▼"
            } else {
                " "
            };
            println!("{} {}", quote.code, quote.name);
            println!(
                "  {:>12}  {} {} ({:+.2}%)",
                quote.price, direction, quote.change, quote.change_percent
            );
            println!("  volume {}", quote.volume);
        }
        StockCommands::Chart { code, days } => {
            let points = gateway.chart(&code, days).await?;
            println!("{:<12} {:>12} {:>14}", "Date", "Price", "Volume");
            println!("{}", "-".repeat(40));
            for point in points {
                println!("{:<12} {:>12} {:>14}", point.date, point.price, point.volume);
            }
        }
    }

    Ok(())
}

/// Admin controller with the current tree loaded
async fn load_controller(
    gateway: HttpGateway,
    config: &Config,
) -> anyhow::Result<AdminController<HttpGateway>> {
    let mut controller = AdminController::new(gateway, config.admin);
    controller.load().await;
    if let Some(error) = controller.screen().error() {
        bail!("{} (is the API running at {}?)", error, config.client.base_url);
    }
    Ok(controller)
}

fn apply_fields(form: &mut stockdash::menu::MenuForm, fields: MenuFields) {
    if let Some(label) = fields.label {
        form.label = label;
    }
    if let Some(icon) = fields.icon {
        form.icon = icon;
    }
    if let Some(path) = fields.path {
        form.path = path;
    }
    if let Some(parent) = fields.parent {
        form.set_parent_input(&parent);
    }
    if let Some(order) = fields.order {
        form.order = order;
    }
}

fn report_submit(outcome: SubmitOutcome) -> anyhow::Result<()> {
    match outcome {
        SubmitOutcome::Saved(node) => {
            println!("Saved menu item {} ({} -> {})", node.id, node.label, node.path);
            Ok(())
        }
        SubmitOutcome::Failed(message) | SubmitOutcome::FailedClosed(message) => bail!(message),
        SubmitOutcome::Stale => Ok(()),
    }
}

fn print_list<G: MenuGateway>(controller: &AdminController<G>) {
    let rows = controller.screen().rows();
    if rows.is_empty() {
        println!("No menu items defined yet.");
        println!();
        println!("Create the first one with:");
        println!("  stockdash menus add --label Dashboard --icon 📊 --path /dashboard");
        return;
    }

    println!("{:<6} {:<32} {:<28} {:>5} {}", "ID", "Label", "Path", "Order", "Active");
    println!("{}", "-".repeat(80));
    for row in rows {
        let label = format!("{}{} {}", "  ".repeat(row.depth), row.icon, row.label);
        println!(
            "{:<6} {:<32} {:<28} {:>5} {}",
            row.id,
            label,
            row.path,
            row.order,
            if row.is_active { "yes" } else { "no" }
        );
    }
}

async fn show_sidebar(
    gateway: &HttpGateway,
    config: &Config,
    path: String,
    collapsed: bool,
    clicks: &[String],
) -> anyhow::Result<()> {
    let mut sidebar = SidebarModel::new(config.navigation.routes.clone(), path);
    let ticket = sidebar.begin_load();
    let result = gateway.list(false).await;
    sidebar.finish_load(ticket, result);
    if let Some(error) = sidebar.error() {
        bail!(error.to_string());
    }
    if collapsed {
        sidebar.toggle_collapsed();
    }

    for id in clicks {
        match sidebar.click(id) {
            ClickOutcome::Toggled { id, expanded } => {
                println!("{} {}", if expanded { "Expanded" } else { "Collapsed" }, id)
            }
            ClickOutcome::Navigate(path) => println!("Navigate to {}", path),
            ClickOutcome::NotImplemented { label } => {
                println!("{} page is not available yet", label)
            }
            ClickOutcome::Unknown => println!("No menu item {}", id),
        }
    }

    for row in sidebar.rows() {
        let marker = if row.active { '●' } else { ' ' };
        let arrow = match (row.has_children, row.expanded) {
            (true, true) => "▾",
            (true, false) => "▸",
            _ => " ",
        };
        if sidebar.is_collapsed() {
            println!("{} {}", marker, row.icon);
        } else {
            println!(
                "{} {}{} {} {}",
                marker,
                " ".repeat((row.indent / 10) as usize),
                row.icon,
                row.label,
                arrow
            );
        }
    }

    Ok(())
}

/// Ask on stdin; anything but y/yes declines
fn ask(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if std::io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdash::menu::MenuForm;

    fn edit_fields(args: &[&str]) -> Result<MenuFields, clap::Error> {
        let cli = Cli::try_parse_from(["stockdash", "menus", "edit", "42"].iter().chain(args))?;
        match cli.command {
            Commands::Menus {
                command: MenuCommands::Edit { fields, .. },
            } => Ok(fields),
            _ => panic!("expected menus edit"),
        }
    }

    #[test]
    fn test_order_must_be_a_number() {
        let err = edit_fields(&["--order", "abc"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_order_accepts_negative_values() {
        let fields = edit_fields(&["--order", "-2", "--label", "Trades"]).unwrap();
        assert_eq!(fields.order, Some(-2));

        let mut form = MenuForm {
            order: 7,
            ..Default::default()
        };
        apply_fields(&mut form, fields);
        assert_eq!(form.order, -2);
        assert_eq!(form.label, "Trades");
    }

    #[test]
    fn test_stock_chart_defaults_to_a_week() {
        let cli = Cli::try_parse_from(["stockdash", "stock", "chart", "005930"]).unwrap();
        match cli.command {
            Commands::Stock {
                command: StockCommands::Chart { code, days },
            } => {
                assert_eq!(code, "005930");
                assert_eq!(days, 7);
            }
            _ => panic!("expected stock chart"),
        }
    }

    #[test]
    fn test_omitted_fields_keep_form_values() {
        let fields = edit_fields(&[]).unwrap();
        let mut form = MenuForm {
            label: "Holdings".to_string(),
            order: 3,
            ..Default::default()
        };
        apply_fields(&mut form, fields);
        assert_eq!(form.label, "Holdings");
        assert_eq!(form.order, 3);
    }
}
