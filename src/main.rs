use iced::keyboard::{self, key::Named};
use iced::widget::scrollable;
use iced::{window, Element, Length, Size, Subscription, Task, Theme};
use rfd::FileDialog;
use std::collections::HashMap;

mod albums;
mod preload;
mod settings;
mod state;
mod ui;

use albums::store::AlbumStore;
use preload::{BatchResult, PreloadOutcome};
use settings::Settings;
use state::loader::GridLoader;
use state::viewer::Lightbox;

/// Presentation state of one image slot, keyed by URL
///
/// Every image starts as `Loading` (skeleton placeholder) and settles to
/// `Ready` or `Broken` when its preload completes.
#[derive(Debug, Clone)]
pub enum ThumbState {
    Loading,
    Ready(iced::widget::image::Handle),
    Broken,
}

/// Which screen is showing
#[derive(Debug, Clone)]
enum Screen {
    /// Cover cards for every album, with search
    AlbumList,
    /// One album's image grid (and possibly the lightbox on top)
    AlbumView { album_id: String },
}

/// Main application state
struct AlbumGallery {
    /// Persisted preferences (the albums folder)
    settings: Settings,
    /// All parsed albums
    store: AlbumStore,
    screen: Screen,
    /// Current album-list search text
    query: String,
    /// Pagination state for the open album's grid
    loader: GridLoader,
    /// Enlarged single-image viewer
    lightbox: Lightbox,
    /// Preloaded image handles, shared by grid, cards and lightbox
    thumbs: HashMap<String, ThumbState>,
    /// Last relative scroll offset seen from the grid (1.0 = bottom)
    last_scroll: f32,
    /// Logical window size, tracked from resize events
    window: Size,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the "Choose Albums Folder" button
    PickAlbumsFolder,
    /// Background scan of the albums folder completed
    AlbumsLoaded(Result<AlbumStore, String>),
    /// Album-list search text changed
    SearchChanged(String),
    /// User clicked an album card
    AlbumOpened(String),
    /// User left the album view
    BackToAlbums,
    /// The album grid scrolled
    GridScrolled(scrollable::Viewport),
    /// A single image preload settled (initial window, covers)
    ImagePreloaded { url: String, outcome: PreloadOutcome },
    /// A whole pagination batch settled
    BatchPreloaded(BatchResult),
    /// User clicked a grid cell
    ImageClicked(usize),
    LightboxClosed,
    LightboxNext,
    LightboxPrevious,
    /// The window was resized (may change the column count)
    WindowResized(Size),
}

/// Default logical size until the first resize event arrives
const DEFAULT_WINDOW_SIZE: Size = Size::new(1024.0, 768.0);

impl AlbumGallery {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();

        let scan = match settings.albums_dir.clone() {
            Some(dir) => {
                println!("📂 Rescanning albums folder: {}", dir.display());
                Task::perform(AlbumStore::scan_async(dir), Message::AlbumsLoaded)
            }
            None => Task::none(),
        };

        let status = match settings.albums_dir {
            Some(_) => "Scanning albums…".to_string(),
            None => "Choose an albums folder to get started.".to_string(),
        };

        (
            AlbumGallery {
                settings,
                store: AlbumStore::default(),
                screen: Screen::AlbumList,
                query: String::new(),
                loader: GridLoader::new(DEFAULT_WINDOW_SIZE.width),
                lightbox: Lightbox::new(),
                thumbs: HashMap::new(),
                last_scroll: 0.0,
                window: DEFAULT_WINDOW_SIZE,
                status,
            },
            scan,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickAlbumsFolder => {
                let folder = FileDialog::new()
                    .set_title("Select Folder with Album Markdown Files")
                    .pick_folder();

                if let Some(dir) = folder {
                    self.settings.albums_dir = Some(dir.clone());
                    self.settings.save();
                    self.status = format!("Scanning {}…", dir.display());
                    return Task::perform(AlbumStore::scan_async(dir), Message::AlbumsLoaded);
                }

                Task::none()
            }
            Message::AlbumsLoaded(Ok(store)) => {
                self.status = format!("{} albums.", store.all().len());

                let covers: Vec<String> = store
                    .all()
                    .iter()
                    .map(|album| album.cover_image.clone())
                    .filter(|url| !url.is_empty())
                    .collect();

                self.store = store;
                self.screen = Screen::AlbumList;
                self.preload_tasks(covers)
            }
            Message::AlbumsLoaded(Err(e)) => {
                eprintln!("❌ Album scan failed: {}", e);
                self.status = format!("Album scan failed: {}", e);
                Task::none()
            }
            Message::SearchChanged(query) => {
                self.query = query;
                Task::none()
            }
            Message::AlbumOpened(album_id) => {
                let Some(album) = self.store.album_by_id(&album_id) else {
                    return Task::none();
                };

                self.loader.initialize(&album_id, album.images.len());
                self.lightbox = Lightbox::new();
                self.last_scroll = 0.0;
                self.status = format!("{} images.", album.images.len());

                // The initial window is promoted immediately; its images
                // preload individually behind per-cell placeholders.
                let urls: Vec<String> = album.images[..self.loader.visible_count()]
                    .iter()
                    .map(|item| item.url.clone())
                    .collect();

                self.screen = Screen::AlbumView { album_id };
                let preloads = self.preload_tasks(urls);

                // A tall window may swallow the whole initial page
                // without scrolling; start loading right away if so.
                Task::batch([preloads, self.maybe_load_more()])
            }
            Message::BackToAlbums => {
                self.screen = Screen::AlbumList;
                self.lightbox.close();
                Task::none()
            }
            Message::GridScrolled(viewport) => {
                let offset = viewport.relative_offset().y;
                if offset.is_finite() {
                    self.last_scroll = offset;
                }
                self.maybe_load_more()
            }
            Message::ImagePreloaded { url, outcome } => {
                let thumb = match outcome {
                    PreloadOutcome::Loaded(handle) => ThumbState::Ready(handle),
                    PreloadOutcome::Failed => ThumbState::Broken,
                };
                self.thumbs.insert(url, thumb);
                Task::none()
            }
            Message::BatchPreloaded(result) => {
                // A stale generation means the album changed while the
                // batch was in flight; drop it on the floor.
                if !self.loader.complete_load(result.generation) {
                    return Task::none();
                }

                for (url, outcome) in result.outcomes {
                    let thumb = match outcome {
                        PreloadOutcome::Loaded(handle) => ThumbState::Ready(handle),
                        PreloadOutcome::Failed => ThumbState::Broken,
                    };
                    self.thumbs.insert(url, thumb);
                }

                // If the user is still parked at the bottom, keep going.
                self.maybe_load_more()
            }
            Message::ImageClicked(index) => {
                self.lightbox.open(index, self.loader.visible_count());
                Task::none()
            }
            Message::LightboxClosed => {
                self.lightbox.close();
                Task::none()
            }
            Message::LightboxNext => {
                self.lightbox.next(self.loader.visible_count());
                Task::none()
            }
            Message::LightboxPrevious => {
                self.lightbox.previous();
                Task::none()
            }
            Message::WindowResized(size) => {
                self.window = size;
                self.loader.set_viewport_width(size.width);
                // Growing the window can expose the sentinel
                self.maybe_load_more()
            }
        }
    }

    /// Start the next pagination batch if the sentinel is in view
    ///
    /// The sentinel counts as visible when the user scrolled past the
    /// threshold, or when the grid is too short to scroll at all (no
    /// scroll event will ever arrive for it). No-ops unless the loader
    /// is idle with more images to show.
    fn maybe_load_more(&mut self) -> Task<Message> {
        let Screen::AlbumView { album_id } = &self.screen else {
            return Task::none();
        };
        let Some(album) = self.store.album_by_id(album_id) else {
            return Task::none();
        };

        let sentinel_visible = self.last_scroll >= ui::grid::SCROLL_LOAD_THRESHOLD
            || !ui::grid::fills_viewport(
                self.loader.visible_count(),
                self.loader.columns(),
                self.window.height,
            );
        if !sentinel_visible {
            return Task::none();
        }

        let Some(batch) = self.loader.begin_load() else {
            return Task::none();
        };

        let urls: Vec<String> = album.images[batch.start..batch.start + batch.count]
            .iter()
            .map(|item| item.url.clone())
            .collect();

        Task::perform(
            preload::preload_batch(urls, batch.generation),
            Message::BatchPreloaded,
        )
    }

    /// Spawn an individual preload for every URL not already cached
    fn preload_tasks(&mut self, urls: Vec<String>) -> Task<Message> {
        let mut tasks = Vec::new();

        for url in urls {
            if self.thumbs.contains_key(&url) {
                continue;
            }
            self.thumbs.insert(url.clone(), ThumbState::Loading);
            tasks.push(Task::perform(
                async move {
                    let outcome = preload::preload(url.clone()).await;
                    (url, outcome)
                },
                |(url, outcome)| Message::ImagePreloaded { url, outcome },
            ));
        }

        Task::batch(tasks)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let body: Element<Message> = match &self.screen {
            Screen::AlbumList => ui::album_list::view(
                self.store.search(&self.query),
                &self.query,
                &self.thumbs,
                self.store.is_empty(),
            ),
            Screen::AlbumView { album_id } => match self.store.album_by_id(album_id) {
                Some(album) => {
                    let grid = ui::grid::view(
                        album,
                        self.loader.visible_count(),
                        self.loader.columns(),
                        &self.thumbs,
                        self.loader.is_loading(),
                    );

                    if self.lightbox.is_open() {
                        iced::widget::stack![
                            grid,
                            iced::widget::opaque(ui::lightbox::view(
                                album,
                                self.lightbox.index(),
                                self.loader.visible_count(),
                                &self.thumbs,
                            )),
                        ]
                        .into()
                    } else {
                        grid
                    }
                }
                None => ui::album_list::view(
                    self.store.search(&self.query),
                    &self.query,
                    &self.thumbs,
                    self.store.is_empty(),
                ),
            },
        };

        iced::widget::column![
            iced::widget::container(body).height(Length::Fill),
            iced::widget::container(iced::widget::text(&self.status).size(13)).padding(6),
        ]
        .into()
    }

    /// Event subscriptions
    ///
    /// Window resizes are always watched; the keyboard stream exists only
    /// while the lightbox is open, so closed-state key presses go nowhere.
    fn subscription(&self) -> Subscription<Message> {
        let resizes = window::resize_events().map(|(_id, size)| Message::WindowResized(size));

        if self.lightbox.is_open() {
            Subscription::batch([resizes, keyboard::on_key_press(handle_lightbox_key)])
        } else {
            resizes
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Keyboard handling while the lightbox is open
fn handle_lightbox_key(key: keyboard::Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    match key {
        keyboard::Key::Named(Named::Escape) => Some(Message::LightboxClosed),
        keyboard::Key::Named(Named::ArrowLeft) => Some(Message::LightboxPrevious),
        keyboard::Key::Named(Named::ArrowRight) => Some(Message::LightboxNext),
        _ => None,
    }
}

fn main() -> iced::Result {
    iced::application("Album Gallery", AlbumGallery::update, AlbumGallery::view)
        .subscription(AlbumGallery::subscription)
        .theme(AlbumGallery::theme)
        .centered()
        .run_with(AlbumGallery::new)
}
