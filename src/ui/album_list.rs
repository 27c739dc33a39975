/// Album list screen
///
/// Cover cards in a flowing wrap layout, with a search box that filters
/// by name or description as you type.

use std::collections::HashMap;

use iced::widget::{button, column, container, image, text, text_input, Space};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::state::data::Album;
use crate::{Message, ThumbState};

const CARD_WIDTH: f32 = 280.0;
const COVER_HEIGHT: f32 = 160.0;

/// Build the album list screen
pub fn view<'a>(
    albums: Vec<&'a Album>,
    query: &'a str,
    thumbs: &'a HashMap<String, ThumbState>,
    store_is_empty: bool,
) -> Element<'a, Message> {
    let header = iced::widget::row![
        text("Albums").size(32),
        Space::with_width(Length::Fill),
        button("Choose Albums Folder…")
            .on_press(Message::PickAlbumsFolder)
            .padding(10),
    ]
    .align_y(Alignment::Center);

    let search = text_input("Search albums…", query)
        .on_input(Message::SearchChanged)
        .padding(10);

    let body: Element<Message> = if store_is_empty {
        container(
            text("No albums yet. Choose a folder with album Markdown files to get started.")
                .size(16),
        )
        .center_x(Length::Fill)
        .padding(40)
        .into()
    } else if albums.is_empty() {
        container(text("No albums match that search.").size(16))
            .center_x(Length::Fill)
            .padding(40)
            .into()
    } else {
        let cards: Vec<Element<Message>> = albums.into_iter().map(|a| card(a, thumbs)).collect();
        Wrap::with_elements(cards)
            .spacing(16.0)
            .line_spacing(16.0)
            .into()
    };

    let content = column![header, search, iced::widget::scrollable(body).height(Length::Fill)]
        .spacing(20)
        .padding(20);

    content.into()
}

/// One clickable album card: cover, name, date, description
fn card<'a>(album: &'a Album, thumbs: &'a HashMap<String, ThumbState>) -> Element<'a, Message> {
    let cover: Element<Message> = match thumbs.get(&album.cover_image) {
        Some(ThumbState::Ready(handle)) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(COVER_HEIGHT))
            .content_fit(iced::ContentFit::Cover)
            .into(),
        _ => container(Space::new(Length::Fill, Length::Fixed(COVER_HEIGHT)))
            .style(container::rounded_box)
            .into(),
    };

    let name: &str = if album.name.is_empty() { &album.id } else { &album.name };

    let mut details = column![cover, text(name).size(18)].spacing(6);
    if !album.date.is_empty() {
        details = details.push(text(&album.date).size(13));
    }
    if !album.description.is_empty() {
        details = details.push(text(&album.description).size(13));
    }

    button(details.width(Length::Fixed(CARD_WIDTH)))
        .on_press(Message::AlbumOpened(album.id.clone()))
        .style(button::secondary)
        .padding(10)
        .into()
}
