//! Headless rendering collaborators
//!
//! A renderer consumes [`TableView`] frames and load failures; it never
//! touches the query state. [`run_renderer`] drives any [`Renderer`] from an
//! [`EventBus`](crate::core::EventBus) subscription.

use crate::core::{EventEnvelope, TableEvent, TableView};
use std::io::Write;
use tokio::sync::broadcast;

/// Downstream consumer of table frames
pub trait Renderer: Send {
    /// Draw a frame
    fn render(&mut self, view: &TableView);

    /// Surface a load failure to the user
    fn show_error(&mut self, message: &str);
}

/// Dispatch bus events to `renderer` until the bus closes
pub async fn run_renderer<R: Renderer>(
    renderer: &mut R,
    mut rx: broadcast::Receiver<EventEnvelope>,
) {
    loop {
        match rx.recv().await {
            Ok(envelope) => match &envelope.event {
                TableEvent::Rendered(view) => renderer.render(view),
                TableEvent::LoadFailed { message } => renderer.show_error(message),
            },
            Err(broadcast::error::RecvError::Lagged(count)) => {
                // Only the latest frame matters, skipping is fine
                tracing::warn!(count, "Renderer lagged, {} frames skipped", count);
            }
            Err(broadcast::error::RecvError::Closed) => {
                tracing::debug!("EventBus closed, stopping renderer");
                break;
            }
        }
    }
}

/// Plain-text table renderer
#[derive(Debug)]
pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write + Send> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Format a frame as text
    pub fn format(view: &TableView) -> String {
        let mut text = String::new();
        text.push_str(&view.summary);
        text.push('\n');

        let header = ["ID", "Title", "Price", "Category"];
        let rows: Vec<[String; 4]> = view
            .rows()
            .iter()
            .map(|p| {
                let cells = p.cells();
                [cells.id, cells.title, cells.price, cells.category]
            })
            .collect();

        let mut widths = header.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: &[&str]| -> String {
            cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        text.push_str(&line(&header));
        text.push('\n');
        for row in &rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            text.push_str(&line(&cells));
            text.push('\n');
        }

        let controls: Vec<String> = view
            .sort_controls
            .iter()
            .map(|c| {
                if c.active {
                    format!("[{}]", c.label)
                } else {
                    c.label.clone()
                }
            })
            .collect();
        text.push_str(&controls.join("  "));
        text.push('\n');

        let prev = if view.prev_enabled { "< prev" } else { "  ----" };
        let next = if view.next_enabled { "next >" } else { "----  " };
        text.push_str(&format!("{}  {}  {}\n", prev, view.page_label, next));
        text
    }
}

impl<W: Write + Send> Renderer for TextRenderer<W> {
    fn render(&mut self, view: &TableView) {
        if let Err(e) = self.out.write_all(Self::format(view).as_bytes()) {
            tracing::warn!(error = %e, "Failed to write table frame");
        }
    }

    fn show_error(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "Failed to load data: {}", message) {
            tracing::warn!(error = %e, "Failed to write error message");
        }
    }
}
