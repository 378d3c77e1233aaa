use iced::widget::{button, container, horizontal_space, mouse_area, row, text, Button, Column, Container, Row, Rule, Space};
use iced::alignment::Horizontal;
use iced::{Alignment, Border, Color, Element, Length};
use iced_font_awesome::{fa_icon_brands, fa_icon_solid};
use crate::app::state::{ClassroomRecord, SsoProvider, TooltipKey, TooltipKind};
use crate::app::{App, Message};
use crate::screens::overlay::{anchored, menu_frame};
use crate::selection::{card_menu_trigger, CARD_MENU_SIZE};

pub const CARD_WIDTH: f32 = 340.0;
const TEAL: Color = Color { r: 0.051, g: 0.580, b: 0.533, a: 1.0 };
const RED: Color = Color { r: 0.863, g: 0.149, b: 0.149, a: 1.0 };

fn menu_item<'a>(icon: &'static str, label: &'static str, on_press: Option<Message>) -> Button<'a, Message> {
    button(
        row![fa_icon_solid(icon).size(14.0), text(label)]
            .spacing(12)
            .align_y(Alignment::Center),
    )
        .width(Length::Fill)
        .padding([8, 16])
        .style(button::text)
        .on_press_maybe(on_press)
}

/// Settings menu body for one card. District-synced classes cannot be edited here.
fn card_menu<'a>(app: &'a App, record: &'a ClassroomRecord) -> Container<'a, Message> {
    let edit = (!record.is_district_managed()).then_some(Message::StartEditingClass(record.id));
    let co_teachers = app
        .config
        .card_variant
        .roster_and_badges()
        .then_some(Message::OpenCoTeacherModal(record.id));

    let items = Column::new()
        .push(menu_item("pen-to-square", "Edit class", edit))
        .push(menu_item("box-archive", "Archive class", None))
        .push(menu_item("trash-can", "Delete class", None).style(button::danger))
        .push(Rule::horizontal(9))
        .push(menu_item("address-card", "Manage students", None))
        .push(menu_item("envelope", "Invite parents", None))
        .push(menu_item("user-plus", "Manage co-teachers", co_teachers));

    menu_frame(items, CARD_MENU_SIZE.width)
}

/// Floating menu for the card whose gear was pressed last, if any.
pub fn card_menu_overlay(app: &App) -> Option<Element<'_, Message>> {
    if !app.config.card_variant.portal_menu() {
        return None;
    }
    let id = app.card_menus.open_id()?;
    let anchor = app.card_menus.anchor()?;
    let record = app.store.get(id)?;
    Some(anchored(card_menu(app, record), anchor))
}

fn grade_badge(record: &ClassroomRecord) -> Container<'_, Message> {
    Container::new(text(record.grade.storage_form()).size(13))
        .padding([4, 12])
        .style(|_| container::Style {
            background: Some(Color::from_rgb8(204, 251, 241).into()),
            text_color: Some(Color::from_rgb8(17, 94, 89)),
            border: Border::default().rounded(12.0),
            ..container::Style::default()
        })
}

fn sso_icon<'a>(provider: SsoProvider) -> Element<'a, Message> {
    match provider {
        SsoProvider::Google => fa_icon_brands("google").size(16.0).into(),
        SsoProvider::Clever => Container::new(text("C").size(12).color(Color::WHITE))
            .center(Length::Fixed(18.0))
            .style(|_| container::Style {
                background: Some(Color::from_rgb8(37, 99, 235).into()),
                border: Border::default().rounded(4.0),
                ..container::Style::default()
            })
            .into(),
    }
}

fn hover_target<'a>(content: impl Into<Element<'a, Message>>, key: TooltipKey) -> Element<'a, Message> {
    mouse_area(content)
        .on_enter(Message::TooltipEntered(key))
        .on_exit(Message::TooltipLeft(key))
        .into()
}

fn tooltip_bubble<'a>(label: String) -> Container<'a, Message> {
    Container::new(text(label).size(12).color(Color::WHITE))
        .padding([4, 8])
        .style(|_| container::Style {
            background: Some(Color::from_rgb8(31, 41, 55).into()),
            border: Border::default().rounded(4.0),
            ..container::Style::default()
        })
}

fn co_teacher_label(count: usize) -> String {
    if count == 1 {
        "1 co-teacher".to_string()
    } else {
        format!("{count} co-teachers")
    }
}

pub fn classroom_card<'a>(app: &'a App, record: &'a ClassroomRecord) -> Element<'a, Message> {
    let variant = app.config.card_variant;
    let roster = app.store.roster(record.id);
    let sso_key = TooltipKey { classroom: record.id, kind: TooltipKind::SsoProvider };
    let roster_key = TooltipKey { classroom: record.id, kind: TooltipKind::CoTeachers };

    let mut header = Row::new()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(grade_badge(record));
    if variant.roster_and_badges() {
        if let Some(provider) = record.sso_provider {
            header = header.push(hover_target(sso_icon(provider), sso_key));
        }
    }
    header = header
        .push(horizontal_space())
        .push(
            Container::new(
                button(fa_icon_solid("gear").size(18.0))
                    .style(button::text)
                    .on_press(Message::ToggleCardMenu(record.id)),
            )
                .id(card_menu_trigger(record.id)),
        );

    let mut body = Column::new().spacing(10).push(header);

    if app.tooltips.is_visible(&sso_key) {
        if let Some(note) = record.sync_note() {
            body = body.push(tooltip_bubble(note));
        }
    }
    // Basic cards keep the menu inside the card
    if !variant.portal_menu() && app.card_menus.is_open_for(record.id) {
        body = body.push(card_menu(app, record));
    }

    let students = if record.student_count == 0 {
        text("0 students").color(RED)
    } else {
        text(format!("{} students", record.student_count)).color(TEAL)
    };
    let mut counts = Row::new()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(fa_icon_solid("users").size(16.0))
        .push(students);
    if record.has_co_teacher {
        let label = if variant.roster_and_badges() {
            co_teacher_label(roster.len())
        } else {
            co_teacher_label(1)
        };
        let badge = row![fa_icon_solid("user-tie").size(16.0), text(label)]
            .spacing(6)
            .align_y(Alignment::Center);
        counts = counts.push(Space::with_width(Length::Fixed(8.0)));
        counts = if variant.roster_and_badges() {
            counts.push(hover_target(badge, roster_key))
        } else {
            counts.push(badge)
        };
    }

    body = body
        .push(text(&record.name).size(22).height(Length::Fixed(58.0)))
        .push(counts);

    if app.tooltips.is_visible(&roster_key) && !roster.is_empty() {
        let names: Vec<&str> = roster.iter().map(|entry| entry.name.as_str()).collect();
        body = body.push(tooltip_bubble(names.join(", ")));
    }

    body = body
        .push(text(format!("Class code: {}", record.class_code)))
        .push(text(format!("School year: {}", record.school_year)))
        .push(
            button(text("Enter class").width(Length::Fill).align_x(Horizontal::Center))
                .width(Length::Fill)
                .padding(12),
        );

    Container::new(body)
        .padding(20)
        .width(Length::Fixed(CARD_WIDTH))
        .style(container::bordered_box)
        .into()
}
