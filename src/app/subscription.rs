use iced::{event, mouse, window, Event, Subscription};
use super::{App, Message};

impl App {
    /// Pointer and window tracking always runs; the outside-click listener is
    /// only subscribed while a menu or dropdown is open.
    pub fn subscription(&self) -> Subscription<Message> {
        let tracking = event::listen_with(track_pointer_and_window);
        if self.popovers_open() {
            Subscription::batch([tracking, event::listen_with(outside_press)])
        } else {
            tracking
        }
    }
}

fn track_pointer_and_window(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Mouse(mouse::Event::CursorMoved { position }) => Some(Message::CursorMoved(position)),
        Event::Window(window::Event::Resized(size)) => Some(Message::ViewportResized(size)),
        _ => None,
    }
}

// Presses captured by a widget (menu items, triggers, the menu body) are not
// outside clicks.
fn outside_press(event: Event, status: event::Status, _window: window::Id) -> Option<Message> {
    match (event, status) {
        (Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)), event::Status::Ignored) => {
            Some(Message::OutsideClick)
        }
        _ => None,
    }
}
