/// Album image grid
///
/// Renders the visible prefix of an album in responsive columns inside a
/// scrollable. Every scroll reports its viewport; once the offset passes
/// the sentinel threshold near the bottom, the app asks the loader for
/// the next batch. Each cell carries its own loading / ready / broken
/// presentation, so a slow or broken image never blocks its neighbors.

use std::collections::HashMap;

use iced::widget::{
    button, column, container, image, mouse_area, row, scrollable, text, Space,
};
use iced::{Alignment, Element, Length};

use crate::state::data::Album;
use crate::{Message, ThumbState};

/// Relative scroll offset past which the sentinel counts as visible
pub const SCROLL_LOAD_THRESHOLD: f32 = 0.9;

const CELL_HEIGHT: f32 = 260.0;
const GRID_SPACING: f32 = 12.0;

/// Vertical room taken by the header and paddings above the grid
const HEADER_ALLOWANCE: f32 = 180.0;

/// Whether `visible_count` images overflow a viewport of this height
///
/// A grid shorter than the window cannot scroll, so no scroll event
/// ever reports the sentinel. This estimate from the fixed cell
/// geometry lets the app treat such a grid as "sentinel in view" and
/// keep loading until the viewport fills or the album runs out.
pub fn fills_viewport(visible_count: usize, columns: usize, viewport_height: f32) -> bool {
    let rows = visible_count.div_ceil(columns.max(1));
    let content = HEADER_ALLOWANCE + rows as f32 * (CELL_HEIGHT + GRID_SPACING);
    content > viewport_height
}

/// Build the album view: header, image grid, load indicator
pub fn view<'a>(
    album: &'a Album,
    visible_count: usize,
    columns: usize,
    thumbs: &'a HashMap<String, ThumbState>,
    is_loading: bool,
) -> Element<'a, Message> {
    let title: &str = if album.name.is_empty() { &album.id } else { &album.name };

    let mut header = column![
        row![
            button("← Albums").on_press(Message::BackToAlbums).padding(8),
            Space::with_width(Length::Fill),
        ]
        .align_y(Alignment::Center),
        text(title).size(32),
    ]
    .spacing(8);
    if !album.date.is_empty() {
        header = header.push(text(&album.date).size(14));
    }
    if !album.description.is_empty() {
        header = header.push(text(&album.description).size(14));
    }

    let visible = &album.images[..visible_count.min(album.images.len())];

    let mut grid = column![].spacing(GRID_SPACING);
    for (row_index, chunk) in visible.chunks(columns.max(1)).enumerate() {
        let mut cells = row![].spacing(GRID_SPACING);
        for (offset, item) in chunk.iter().enumerate() {
            let index = row_index * columns.max(1) + offset;
            cells = cells.push(cell(index, &item.title, &item.url, thumbs));
        }
        // Pad the last row so its cells keep the same width as full rows
        for _ in chunk.len()..columns.max(1) {
            cells = cells.push(Space::new(Length::Fill, Length::Fixed(CELL_HEIGHT)));
        }
        grid = grid.push(cells);
    }

    let mut page = column![header, grid].spacing(20);
    if is_loading {
        page = page.push(
            container(text("Loading more…").size(14))
                .center_x(Length::Fill)
                .padding(10),
        );
    }

    scrollable(container(page).width(Length::Fill).padding(20))
        .on_scroll(Message::GridScrolled)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// One grid cell
///
/// Shows a skeleton placeholder until the preload settles, the decoded
/// image afterwards, and a broken-image note when it failed. The title
/// overlay appears only once the image itself is ready.
fn cell<'a>(
    index: usize,
    title: &'a str,
    url: &'a str,
    thumbs: &'a HashMap<String, ThumbState>,
) -> Element<'a, Message> {
    let content: Element<Message> = match thumbs.get(url) {
        Some(ThumbState::Ready(handle)) => {
            let img = image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(CELL_HEIGHT))
                .content_fit(iced::ContentFit::Cover);

            if title.is_empty() {
                img.into()
            } else {
                iced::widget::stack![
                    img,
                    container(caption(title))
                        .align_y(iced::alignment::Vertical::Bottom)
                        .width(Length::Fill)
                        .height(Length::Fixed(CELL_HEIGHT)),
                ]
                .into()
            }
        }
        Some(ThumbState::Broken) => container(text("image unavailable").size(13))
            .style(container::rounded_box)
            .center_x(Length::Fill)
            .center_y(Length::Fixed(CELL_HEIGHT))
            .into(),
        _ => container(Space::new(Length::Fill, Length::Fixed(CELL_HEIGHT)))
            .style(container::rounded_box)
            .into(),
    };

    mouse_area(container(content).width(Length::Fill))
        .on_press(Message::ImageClicked(index))
        .into()
}

/// Translucent title bar along the bottom edge of a cell
fn caption(title: &str) -> Element<Message> {
    container(text(title).size(13).color(iced::Color::WHITE))
        .width(Length::Fill)
        .padding(6)
        .style(|_theme| container::Style {
            background: Some(iced::Color::from_rgba(0.0, 0.0, 0.0, 0.6).into()),
            ..container::Style::default()
        })
        .into()
}
