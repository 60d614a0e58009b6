//! Plain-text rendering of a mirrored wall.

use std::fmt::Write;

use wall_common::Rect;
use wall_display::{DisplaySnapshot, GridLayout};

/// Render `snapshot` as one line per cell: tiles first, in selection
/// order, then the empty placeholder cells.
pub fn render(snapshot: &DisplaySnapshot, layout: &GridLayout, viewport: Rect) -> String {
    let cells = layout.cells(snapshot.mode, viewport);
    let visible = snapshot.visible_tiles();
    let benched = snapshot.tiles.len() - visible.len();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} layout, {} columns, {} selected{}",
        snapshot.mode,
        snapshot.grid_cols(),
        snapshot.selected.len(),
        if benched > 0 {
            format!(" ({benched} off screen)")
        } else {
            String::new()
        }
    );

    for (i, cell) in cells.iter().enumerate() {
        let at = format!(
            "{:>4.0},{:<4.0} {:>4.0}x{:<4.0}",
            cell.x, cell.y, cell.width, cell.height
        );
        match visible.get(i) {
            Some(tile) => {
                let source = match (&tile.resolved_hls_url, &tile.webrtc) {
                    (Some(url), Some(rtc)) => format!("{url} (rtc {})", rtc.room),
                    (Some(url), None) => url.clone(),
                    (None, Some(rtc)) => format!("rtc {}", rtc.room),
                    (None, None) => "no signal".to_string(),
                };
                let _ = writeln!(out, "[{}] {at}  {}  {source}", i + 1, tile.title);
            }
            None => {
                let _ = writeln!(out, "[{}] {at}  (empty)", i + 1);
            }
        }
    }
    out
}
