/// Lightbox overlay
///
/// One enlarged image over a dimmed backdrop, with previous/next/close
/// controls and an `i / n` position footer. Clicking the backdrop closes
/// it; Escape and the arrow keys are handled by the app's keyboard
/// subscription, which only exists while the lightbox is open.

use std::collections::HashMap;

use iced::widget::{button, column, container, image, mouse_area, row, text, Space};
use iced::{Alignment, Element, Length};

use crate::state::data::Album;
use crate::{Message, ThumbState};

/// Build the overlay for the image at `index`
///
/// `visible_count` bounds navigation: the next arrow disappears at the
/// end of the visible window, the previous arrow at index 0.
pub fn view<'a>(
    album: &'a Album,
    index: usize,
    visible_count: usize,
    thumbs: &'a HashMap<String, ThumbState>,
) -> Element<'a, Message> {
    let item = &album.images[index];

    let picture: Element<Message> = match thumbs.get(&item.url) {
        Some(ThumbState::Ready(handle)) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(iced::ContentFit::Contain)
            .into(),
        Some(ThumbState::Broken) => centered_note("image unavailable"),
        _ => centered_note("Loading…"),
    };

    let previous: Element<Message> = if index > 0 {
        button(text("‹").size(32))
            .on_press(Message::LightboxPrevious)
            .style(button::text)
            .into()
    } else {
        Space::with_width(Length::Shrink).into()
    };

    let next: Element<Message> = if index + 1 < visible_count {
        button(text("›").size(32))
            .on_press(Message::LightboxNext)
            .style(button::text)
            .into()
    } else {
        Space::with_width(Length::Shrink).into()
    };

    let top_bar = row![
        Space::with_width(Length::Fill),
        button(text("✕").size(20))
            .on_press(Message::LightboxClosed)
            .style(button::text),
    ];

    let mut footer = column![].spacing(4).align_x(Alignment::Center);
    if !item.title.is_empty() {
        footer = footer.push(text(&item.title).size(18).color(iced::Color::WHITE));
    }
    footer = footer.push(
        text(format!("{} / {}", index + 1, visible_count))
            .size(13)
            .color(iced::Color::WHITE),
    );

    let content = column![
        top_bar,
        row![previous, picture, next]
            .spacing(12)
            .align_y(Alignment::Center)
            .height(Length::Fill),
        container(footer).center_x(Length::Fill).padding(12),
    ]
    .padding(16);

    // Clicks on the dimmed backdrop close the viewer; the inner widgets
    // capture their own clicks first.
    mouse_area(
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Color::from_rgba(0.0, 0.0, 0.0, 0.85).into()),
                ..container::Style::default()
            }),
    )
    .on_press(Message::LightboxClosed)
    .into()
}

fn centered_note(note: &str) -> Element<'_, Message> {
    container(text(note).size(16).color(iced::Color::WHITE))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
