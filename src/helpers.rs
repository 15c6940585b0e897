use ratatui::layout::Rect;

pub fn centered_rect_with_percentage(percent_x: u16, percent_y: u16, cols: u16, rows: u16) -> Rect {
    let width = cols * percent_x / 100;
    let height = std::cmp::min(std::cmp::max(rows * percent_y / 100, 5), rows);
    Rect::new((cols - width) / 2, (rows - height) / 2, width, height)
}

/// Center a `width` x `height` rect inside `area`, shrinking it to fit.
pub fn centered_in(area: Rect, width: u16, height: u16) -> Rect {
    let actual_width = width.min(area.width);
    let actual_height = height.min(area.height);
    Rect::new(
        area.x + (area.width - actual_width) / 2,
        area.y + (area.height - actual_height) / 2,
        actual_width,
        actual_height,
    )
}

/// Map a pixel span onto whole cells: `(first_cell, cell_count)`, kept
/// inside `[0, limit)` and at least one cell long when `limit > 0`.
pub fn px_span_to_cells(start_px: f64, len_px: f64, cell_px: f64, limit: u16) -> (u16, u16) {
    if limit == 0 {
        return (0, 0);
    }
    let count = ((len_px / cell_px).round().max(1.0) as u16).min(limit);
    let first = ((start_px / cell_px).round().max(0.0) as u16).min(limit - count);
    (first, count)
}

/// Cell row of a pointer event, as a pixel height measured from `origin_row`.
/// The pointer sits in the middle of its cell.
pub fn row_to_px(row: u16, origin_row: u16, cell_px: f64) -> f64 {
    (f64::from(row) - f64::from(origin_row) + 0.5) * cell_px
}

/// Height of the surface the table is centered in, in pixels, such that
/// `(surface - table) / 2` lands exactly on the table's first row.
pub fn surface_height_px(surface: Rect, table: Rect, cell_px: f64) -> f64 {
    let top_margin = table.y.saturating_sub(surface.y);
    f64::from(2 * top_margin + table.height) * cell_px
}
