pub mod nav_menu;
pub mod classes;
pub mod class_card;
pub mod edit_class;
pub mod co_teachers;
pub mod archived;
pub mod settings;
pub mod overlay;

pub use nav_menu::nav_menu;
pub use classes::{classes_screen, sort_dropdown_overlay};
pub use class_card::card_menu_overlay;
pub use edit_class::edit_class_modal;
pub use co_teachers::co_teacher_modal;
pub use archived::archived_screen;
pub use settings::settings_screen;
