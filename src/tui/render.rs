//! Draw surface: paints laid-out regions with ratatui widgets

use crate::tui::layout::{Region, RegionContent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Paint `regions` in order, clipped to the frame.
///
/// Later regions draw over earlier ones, so block frames come before the
/// content inside them.
pub fn draw_regions(frame: &mut Frame, regions: &[Region]) {
    let screen = frame.area();
    for region in regions {
        let area = region.rect.intersection(screen);
        if area.is_empty() {
            continue;
        }
        draw_region(frame, region, area);
    }
}

fn draw_region(frame: &mut Frame, region: &Region, area: Rect) {
    match &region.content {
        RegionContent::HeaderText(text) => {
            frame.render_widget(Paragraph::new(text.as_str()).style(region.style), area);
        }
        RegionContent::BlockFrame { title } => {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title.as_str(), region.style));
            frame.render_widget(block, area);
        }
        RegionContent::Label(text) | RegionContent::DetailLine(text) => {
            frame.render_widget(Paragraph::new(text.as_str()).style(region.style), area);
        }
        RegionContent::ProgressGauge { percent, caption } => {
            let gauge = Gauge::default()
                .gauge_style(region.style)
                .label(Span::styled(caption.as_str(), Style::default()))
                .percent((*percent).min(100));
            frame.render_widget(gauge, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::layout::{error_banner, layout};
    use crate::types::{Application, EnrichedApplication, EnrichedJob, Job, Snapshot, Stage};
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn sample_snapshot() -> Snapshot {
        let stage = Stage {
            index: 4,
            name: "map".to_string(),
            details: "org.apache.spark.rdd.RDD.map\nMain.main(Main.scala:10)".to_string(),
            status: "ACTIVE".to_string(),
            tasks: 10,
            active_tasks: 2,
            completed_tasks: 3,
            failed_tasks: 0,
            killed_tasks: 0,
            resolved: true,
        };
        let mut snapshot = Snapshot::empty("http://x");
        snapshot.applications.push(EnrichedApplication {
            app: Application {
                id: "app-1".to_string(),
                name: "etl".to_string(),
            },
            jobs: vec![EnrichedJob {
                job: Job {
                    index: 0,
                    name: "count".to_string(),
                    stage_refs: vec![4],
                    status: "RUNNING".to_string(),
                },
                stages: vec![stage],
            }],
        });
        snapshot
    }

    #[test]
    fn test_draws_snapshot() {
        let snapshot = sample_snapshot();
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                draw_regions(f, &layout(area.width, area.height, &snapshot));
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Running against Spark on http://x"));
        assert!(text.contains("etl (app-1)"));
        assert!(text.contains("count (1 stage)"));
        assert!(text.contains("4 ACTIVE: map"));
        assert!(text.contains("3/10 (2 active)"));
        assert!(text.contains("Main.main(Main.scala:10)"));
    }

    #[test]
    fn test_truncated_label_shows_ellipsis() {
        let mut snapshot = sample_snapshot();
        let long_name = "x".repeat(60);
        snapshot.applications[0].jobs[0].stages[0].name = long_name;
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                draw_regions(f, &layout(area.width, area.height, &snapshot));
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..40u16).map(|x| buffer[(x, 4u16)].symbol()).collect();
        // label_width(40) = 20: 17 characters then the ellipsis
        let expected = format!("4 ACTIVE: {}...", "x".repeat(7));
        assert_eq!(&row[row.find('4').unwrap()..][..20], expected, "{row}");
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let snapshot = sample_snapshot();
        let mut terminal = Terminal::new(TestBackend::new(4, 3)).unwrap();
        terminal
            .draw(|f| {
                // Layout for a bigger screen than we actually have
                draw_regions(f, &layout(60, 20, &snapshot));
            })
            .unwrap();
    }

    #[test]
    fn test_draws_error_banner() {
        let mut terminal = Terminal::new(TestBackend::new(50, 4)).unwrap();
        terminal
            .draw(|f| draw_regions(f, &[error_banner(50, "HTTP 502")]))
            .unwrap();
        assert!(buffer_text(&terminal).contains("Refresh failed: HTTP 502"));
    }
}
