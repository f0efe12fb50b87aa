use iced::widget::{button, center, column, container, image, row, text};
use iced::{Background, Border, Color, ContentFit, Element, Length, Theme};

use crate::message::Message;
use crate::pager::Page;
use crate::playback::Playback;
use crate::state::{Kiosk, Screen};

const GRID_PADDING: u16 = 10;

/// Style for the dark kiosk buttons; `focused` draws the hovered look.
fn kiosk_button(focused: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let highlighted =
            focused || matches!(status, button::Status::Hovered | button::Status::Pressed);
        button::Style {
            background: Some(Background::Color(if highlighted {
                Color::from_rgb8(60, 60, 60)
            } else {
                Color::BLACK
            })),
            text_color: Color::WHITE,
            border: Border {
                color: Color::from_rgb8(90, 90, 90),
                width: if highlighted { 2.0 } else { 1.0 },
                radius: 4.0.into(),
            },
            ..button::Style::default()
        }
    }
}

fn black_background(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Color::BLACK.into()),
        ..Default::default()
    }
}

/// Render the main view.
pub fn render_main_view(kiosk: &Kiosk) -> Element<'_, Message> {
    let content = match (kiosk.screen(), &kiosk.playback) {
        (Screen::Playback, Some(playback)) => render_playback_screen(kiosk, playback),
        _ => render_selection_screen(kiosk),
    };

    container(content)
        .style(black_background)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn render_selection_screen(kiosk: &Kiosk) -> Element<'_, Message> {
    let title = container(text(&kiosk.title).size(24).color(Color::WHITE))
        .center_x(Length::Fill)
        .padding(10);

    let grid: Element<'_, Message> = match kiosk.pager.visible_page() {
        Some(page) => render_page(kiosk, page),
        None => {
            let note = if kiosk.catalog.is_empty() {
                "No videos found".to_string()
            } else {
                format!("{} videos, no page loaded", kiosk.catalog.len())
            };
            center(text(note).size(18).color(Color::WHITE)).into()
        }
    };

    column![title, grid, render_nav_bar(kiosk)]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Render one page as a full `rows x cols` grid; empty slots keep the
/// remaining thumbnails at a uniform size.
fn render_page<'a>(kiosk: &'a Kiosk, page: &'a Page) -> Element<'a, Message> {
    let grid = kiosk.pager.grid();

    let rows: Vec<Element<'_, Message>> = (0..grid.rows)
        .map(|r| {
            let cells: Vec<Element<'_, Message>> = (0..grid.cols)
                .map(|c| match page.video_at(r, c) {
                    Some(filename) => render_thumbnail(kiosk, filename),
                    None => container("")
                        .width(Length::Fill)
                        .height(Length::Fill)
                        .into(),
                })
                .collect();
            row(cells)
                .spacing(f32::from(GRID_PADDING))
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        })
        .collect();

    column(rows)
        .spacing(f32::from(GRID_PADDING))
        .padding(GRID_PADDING)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn render_thumbnail<'a>(kiosk: &'a Kiosk, filename: &'a str) -> Element<'a, Message> {
    let content: Element<'_, Message> = match kiosk.catalog.get(filename) {
        Some(entry) => image(entry.thumbnail.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => center(text(filename).color(Color::WHITE)).into(),
    };

    button(content)
        .on_press(Message::Play(filename.to_string()))
        .style(kiosk_button(false))
        .padding(0)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn render_nav_bar(kiosk: &Kiosk) -> Element<'_, Message> {
    let nav = kiosk.pager.nav();
    let mut bar = row![].spacing(f32::from(GRID_PADDING)).width(Length::Fill);

    if nav.previous {
        bar = bar.push(
            button(text("Previous Page").center().width(Length::Fill))
                .on_press(Message::PreviousPage)
                .style(kiosk_button(false))
                .padding(8)
                .width(Length::Fill),
        );
    }
    if nav.next {
        bar = bar.push(
            button(text("Next Page").center().width(Length::Fill))
                .on_press(Message::NextPage)
                .style(kiosk_button(false))
                .padding(8)
                .width(Length::Fill),
        );
    }

    container(bar)
        .padding([0, GRID_PADDING])
        .width(Length::Fill)
        .into()
}

fn render_playback_screen<'a>(kiosk: &'a Kiosk, playback: &'a Playback) -> Element<'a, Message> {
    let surface: Element<'_, Message> = match playback.frame() {
        Some(frame) => image(frame.clone())
            .content_fit(ContentFit::Fill)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => container("")
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
    };

    let exit = button(text("Exit").center().width(Length::Fill))
        .on_press(Message::ExitPlayback)
        .style(kiosk_button(kiosk.exit_focused))
        .padding(8)
        .width(Length::Fill);

    column![surface, container(exit).padding([5, 0])]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
