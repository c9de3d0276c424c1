use crate::types::{BoxSize, Orientation, Rect};
use crate::window::DrawError;

/// Rows taken by the input strip: five field rows plus the border.
pub const INPUT_ROWS: u16 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub input: Rect,
    pub visual: Rect,
}

/// Split the screen into the input strip and the visual region.
pub fn layout(orientation: Orientation, screen: BoxSize) -> Result<PanelLayout, DrawError> {
    match orientation {
        Orientation::North => {
            let input_rows = INPUT_ROWS.min(screen.height);
            Ok(PanelLayout {
                input: Rect::new(0, 0, screen.width, input_rows),
                visual: Rect::new(0, input_rows, screen.width, screen.height - input_rows),
            })
        }
        other => Err(DrawError::UnsupportedLayout(other)),
    }
}
