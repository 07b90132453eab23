/// Position and size of a single view, in the units `push_view_dimensions`
/// takes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn flip(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Split the usable area into `view_count` rectangles, alternating the split
/// axis at every step so the views spiral down towards the bottom right.
///
/// Every view but the last takes `ratio` of what is left along the current
/// axis (minus half a gutter) and the full extent along the other one. The
/// last view takes everything that remains. All arithmetic saturates, so an
/// area smaller than the paddings yields zero-sized views instead of
/// wrapping.
pub fn place(
    usable_width: u32,
    usable_height: u32,
    outer_padding: u32,
    view_padding: u32,
    view_count: u32,
    horizontal_ratio: f64,
    vertical_ratio: f64,
) -> Vec<Rect> {
    let mut views = Vec::with_capacity(view_count as usize);

    let mut width = usable_width.saturating_sub(outer_padding.saturating_mul(2));
    let mut height = usable_height.saturating_sub(outer_padding.saturating_mul(2));
    let mut x = outer_padding;
    let mut y = outer_padding;
    let mut axis = Axis::Horizontal;
    let half_padding = view_padding / 2;

    for i in 0..view_count {
        let (view_width, view_height) = if i == view_count - 1 {
            (width, height)
        } else {
            match axis {
                Axis::Horizontal => (
                    scale(width, horizontal_ratio).saturating_sub(half_padding),
                    height,
                ),
                Axis::Vertical => (
                    width,
                    scale(height, vertical_ratio).saturating_sub(half_padding),
                ),
            }
        };

        views.push(Rect {
            x: to_coordinate(x),
            y: to_coordinate(y),
            width: view_width,
            height: view_height,
        });

        match axis {
            Axis::Horizontal => {
                let step = view_width.saturating_add(view_padding);
                width = width.saturating_sub(step);
                x = x.saturating_add(step);
            }
            Axis::Vertical => {
                let step = view_height.saturating_add(view_padding);
                height = height.saturating_sub(step);
                y = y.saturating_add(step);
            }
        }
        axis = axis.flip();
    }

    views
}

/// Fraction of a dimension in whole pixels. The ratio is taken as an integer
/// percentage so products like `100 * 0.57` cannot fall a pixel short.
fn scale(dimension: u32, ratio: f64) -> u32 {
    let percent = (ratio * 100.0).round() as u64;
    u32::try_from(u64::from(dimension) * percent / 100).unwrap_or(u32::MAX)
}

fn to_coordinate(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
