use iced::widget::{container, mouse_area, Container, Space, Stack};
use iced::{Border, Color, Element, Length, Padding, Point};
use crate::app::Message;

const BACKDROP: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.5 };

/// Places `content` with its top-left corner at `anchor` (window coordinates).
/// Presses on the content are swallowed so they never count as outside clicks.
pub fn anchored<'a>(content: impl Into<Element<'a, Message>>, anchor: Point) -> Element<'a, Message> {
    Container::new(mouse_area(content).on_press(Message::NoOp))
        .padding(Padding { top: anchor.y, right: 0.0, bottom: 0.0, left: anchor.x })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Popup menu frame shared by the card menus and the sort dropdown.
pub fn menu_frame<'a>(content: impl Into<Element<'a, Message>>, width: f32) -> Container<'a, Message> {
    Container::new(content)
        .width(Length::Fixed(width))
        .padding([8, 0])
        .style(|theme| container::Style {
            border: Border::default().rounded(8.0).width(1.0).color(Color::from_rgb8(229, 231, 235)),
            ..container::bordered_box(theme)
        })
}

/// Dimmed backdrop plus a centred dialog; pressing the backdrop sends `on_dismiss`.
pub fn modal<'a>(
    content: impl Into<Element<'a, Message>>,
    on_dismiss: Message,
    width: f32,
) -> Element<'a, Message> {
    let dialog = Container::new(content)
        .style(container::bordered_box)
        .padding(24)
        .width(Length::Fixed(width));

    let backdrop = mouse_area(
        Container::new(Space::new(Length::Fill, Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_| container::background(BACKDROP)),
    )
    .on_press(on_dismiss);

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(backdrop)
        .push(Container::new(mouse_area(dialog).on_press(Message::NoOp)).center(Length::Fill))
        .into()
}
