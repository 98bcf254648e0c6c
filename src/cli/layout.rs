//! Dashboard layout CLI commands
//!
//! The layout lives in the settings file, so these commands never touch the
//! user's documents.

use clap::Subcommand;

use crate::config::{DashboardPaths, Settings};
use crate::error::{FinanceError, FinanceResult};
use crate::models::Widget;

/// Layout subcommands
#[derive(Subcommand)]
pub enum LayoutCommands {
    /// Print widget order and visibility
    Show,

    /// Move a widget to a position (0 is the top)
    Move { widget: Widget, index: usize },

    /// Show a hidden widget
    #[command(name = "show-widget")]
    ShowWidget { widget: Widget },

    /// Hide a widget
    #[command(name = "hide-widget")]
    HideWidget { widget: Widget },

    /// Restore the default order with everything visible
    Reset,
}

/// Handle a layout command
pub fn handle_layout_command(
    paths: &DashboardPaths,
    settings: &mut Settings,
    cmd: LayoutCommands,
) -> FinanceResult<()> {
    match cmd {
        LayoutCommands::Show => {
            print_layout(settings);
            return Ok(());
        }
        LayoutCommands::Move { widget, index } => {
            settings.layout.move_widget(widget, index);
            println!("Moved {} to position {}", widget, position_of(settings, widget)?);
        }
        LayoutCommands::ShowWidget { widget } => {
            settings.layout.set_visible(widget, true);
            println!("{} is now visible", widget);
        }
        LayoutCommands::HideWidget { widget } => {
            settings.layout.set_visible(widget, false);
            println!("{} is now hidden", widget);
        }
        LayoutCommands::Reset => {
            settings.layout.reset();
            println!("Layout reset to defaults");
        }
    }

    settings.save(paths)?;
    tracing::debug!(layout = ?settings.layout, "saved dashboard layout");
    Ok(())
}

fn position_of(settings: &Settings, widget: Widget) -> FinanceResult<usize> {
    settings
        .layout
        .position(widget)
        .ok_or_else(|| FinanceError::Config(format!("Widget missing from layout: {}", widget)))
}

fn print_layout(settings: &Settings) {
    for (index, slot) in settings.layout.widgets.iter().enumerate() {
        println!(
            "{:>2}. {:<14} {:<22} {}",
            index,
            slot.widget.to_string(),
            slot.widget.title(),
            if slot.visible { "visible" } else { "hidden" }
        );
    }
}
