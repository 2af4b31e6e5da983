//! Layout engine
//!
//! Turns a [`Snapshot`] plus the terminal size into an ordered list of
//! positioned regions. The whole screen is re-derived on every call: the
//! traversal applications → jobs → stages is a fold threading a
//! `(cursor, regions)` accumulator, so there is no layout state between
//! frames.
//!
//! Screen structure, top-down:
//!
//! ```text
//! row 0       header (host)
//! row 1       spacer / error banner
//! row 2..     one bordered block per application
//!               one bordered block per job, inset by one column
//!                 3 rows per stage: label | gauge, detail line, spacing
//! ```

use crate::tui::colors;
use crate::types::{EnrichedApplication, EnrichedJob, Snapshot, Stage};
use ratatui::{layout::Rect, style::Style};

/// Rows above the first application block (header + spacer)
pub const HEADER_ROWS: u16 = 2;

/// Row used by the error banner
pub const BANNER_ROW: u16 = 1;

/// Rows each stage occupies inside its job block
pub const STAGE_ROWS: u16 = 3;

/// Detail lines starting with this belong to Spark itself
pub const INTERNAL_FRAME_PREFIX: &str = "org.apache";

/// Shown when every detail line is an internal frame
pub const INTERNAL_DETAIL_PLACEHOLDER: &str = "<spark internal>";

const ELLIPSIS: &str = "...";

/// Column where stage content starts (application border + job border)
const CONTENT_X: u16 = 2;

/// What a region draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionContent {
    /// Single-line header text
    HeaderText(String),
    /// Bordered block with a title
    BlockFrame { title: String },
    /// Stage label
    Label(String),
    /// Stage progress bar
    ProgressGauge { percent: u16, caption: String },
    /// First user-code line of the stage details
    DetailLine(String),
}

/// A positioned, styled rectangle of screen content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub rect: Rect,
    pub content: RegionContent,
    pub style: Style,
}

impl Region {
    fn new(rect: Rect, content: RegionContent, style: Style) -> Self {
        Self {
            rect,
            content,
            style,
        }
    }

    /// True for regions that draw stage content rather than a frame
    pub fn is_leaf(&self) -> bool {
        !matches!(
            self.content,
            RegionContent::BlockFrame { .. } | RegionContent::HeaderText(_)
        )
    }
}

/// Lay out `snapshot` on a `width` x `height` terminal.
///
/// Total: any input yields a valid list, starting with the header. Regions
/// whose top row falls below the terminal are dropped; the rest may extend
/// past the bottom edge and are clipped by the renderer.
pub fn layout(width: u16, height: u16, snapshot: &Snapshot) -> Vec<Region> {
    let init = (HEADER_ROWS, vec![header_region(width, snapshot)]);

    let (_, regions) = snapshot
        .applications
        .iter()
        .fold(init, |(y, mut regions), app| {
            regions.extend(application_regions(app, y, width));
            (y.saturating_add(application_height(app)), regions)
        });

    let visible_rows = height.max(1);
    regions
        .into_iter()
        .filter(|region| region.rect.y < visible_rows)
        .collect()
}

/// Full-width banner on the spacer row, shown when a refresh failed
pub fn error_banner(width: u16, message: &str) -> Region {
    Region::new(
        Rect::new(0, BANNER_ROW, width, 1),
        RegionContent::HeaderText(format!("Refresh failed: {}", message)),
        colors::banner_style(),
    )
}

/// Height of an application block: borders plus all of its job blocks
pub fn application_height(app: &EnrichedApplication) -> u16 {
    let jobs: u16 = app
        .jobs
        .iter()
        .fold(0u16, |acc, job| acc.saturating_add(job_height(job)));
    jobs.saturating_add(2)
}

/// Height of a job block: top border, stage rows, bottom row
pub fn job_height(job: &EnrichedJob) -> u16 {
    let stages = u16::try_from(job.stages.len()).unwrap_or(u16::MAX);
    stages.saturating_mul(STAGE_ROWS).saturating_add(2)
}

/// Width of the label column; the gauge takes the rest
pub fn label_width(total_width: u16) -> u16 {
    total_width / 2
}

/// Cut `text` to at most `width` characters, ending in "..." when cut.
///
/// Widths below the ellipsis length degrade to dots only.
pub fn truncate_label(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width < ELLIPSIS.len() {
        return ".".repeat(width);
    }
    let mut truncated: String = text.chars().take(width - ELLIPSIS.len()).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Completion percent, rounded up, in `0..=100`; 0 when there are no tasks
pub fn gauge_percent(stage: &Stage) -> u16 {
    if stage.tasks == 0 {
        return 0;
    }
    let completed = u64::from(stage.completed_tasks);
    let tasks = u64::from(stage.tasks);
    let percent = (completed * 100).div_ceil(tasks).min(100);
    percent as u16
}

/// "completed/tasks", plus the active count while tasks are running
pub fn gauge_caption(stage: &Stage) -> String {
    if stage.active_tasks == 0 {
        format!("{}/{}", stage.completed_tasks, stage.tasks)
    } else {
        format!(
            "{}/{} ({} active)",
            stage.completed_tasks, stage.tasks, stage.active_tasks
        )
    }
}

/// First details line that is not a Spark-internal frame
pub fn detail_line(details: &str) -> &str {
    details
        .split('\n')
        .find(|line| !line.starts_with(INTERNAL_FRAME_PREFIX))
        .unwrap_or(INTERNAL_DETAIL_PLACEHOLDER)
}

fn header_region(width: u16, snapshot: &Snapshot) -> Region {
    let base = format!("Running against Spark on {}", snapshot.host);
    let stamped = format!(
        "{}  (updated {} UTC)",
        base,
        snapshot.fetched_at.format("%H:%M:%S")
    );
    let text = if stamped.chars().count() <= usize::from(width) {
        stamped
    } else {
        base
    };

    Region::new(
        Rect::new(0, 0, width, 1),
        RegionContent::HeaderText(text),
        colors::header_style(),
    )
}

fn application_regions(app: &EnrichedApplication, top: u16, width: u16) -> Vec<Region> {
    let frame = Region::new(
        Rect::new(0, top, width, application_height(app)),
        RegionContent::BlockFrame {
            title: format!("{} ({})", app.app.name, app.app.id),
        },
        colors::application_style(),
    );

    // Jobs start below the application's top border
    let init = (top.saturating_add(1), vec![frame]);
    let (_, regions) = app.jobs.iter().fold(init, |(y, mut regions), job| {
        regions.extend(job_regions(job, y, width));
        (y.saturating_add(job_height(job)), regions)
    });
    regions
}

fn job_regions(job: &EnrichedJob, top: u16, width: u16) -> Vec<Region> {
    let count = job.stages.len();
    let frame = Region::new(
        Rect::new(1, top, width.saturating_sub(2), job_height(job)),
        RegionContent::BlockFrame {
            title: format!(
                "{} ({} stage{})",
                job.job.name,
                count,
                if count == 1 { "" } else { "s" }
            ),
        },
        colors::job_style(),
    );

    let init = (top.saturating_add(1), vec![frame]);
    let (_, regions) = job.stages.iter().fold(init, |(y, mut regions), stage| {
        regions.extend(stage_regions(stage, y, width));
        (y.saturating_add(STAGE_ROWS), regions)
    });
    regions
}

fn stage_regions(stage: &Stage, top: u16, width: u16) -> [Region; 3] {
    let label_w = label_width(width);
    let inner_right = width.saturating_sub(2);

    let label_text = truncate_label(
        &format!("{} {}: {}", stage.index, stage.status, stage.name),
        usize::from(label_w),
    );
    // The label column holds a full `label_w` characters; the gauge follows it
    let gauge_x = CONTENT_X.saturating_add(label_w);
    let label = Region::new(
        Rect::new(
            CONTENT_X,
            top,
            label_w.min(inner_right.saturating_sub(CONTENT_X)),
            1,
        ),
        RegionContent::Label(label_text),
        Style::default(),
    );

    let gauge = Region::new(
        Rect::new(gauge_x, top, inner_right.saturating_sub(gauge_x), 1),
        RegionContent::ProgressGauge {
            percent: gauge_percent(stage),
            caption: gauge_caption(stage),
        },
        Style::default().fg(colors::stage_color(&stage.status, stage.resolved)),
    );

    let detail = Region::new(
        Rect::new(
            CONTENT_X,
            top.saturating_add(1),
            inner_right.saturating_sub(CONTENT_X),
            1,
        ),
        RegionContent::DetailLine(detail_line(&stage.details).to_string()),
        colors::detail_style(),
    );

    [label, gauge, detail]
}
