// Standalone components
pub mod avatar;
pub mod button;
pub mod card;
pub mod input;
pub mod loading;
pub mod page_header;
pub mod progress_bar;
pub mod read_only_field;
pub mod site_nav;
pub mod stat_card;
pub mod tag_list;

// Primitive wrappers
pub mod dropdown_menu;

pub use avatar::*;
pub use button::*;
pub use card::*;
pub use dropdown_menu::*;
pub use input::*;
pub use loading::*;
pub use page_header::*;
pub use progress_bar::*;
pub use read_only_field::*;
pub use site_nav::*;
pub use stat_card::*;
pub use tag_list::*;

#[cfg(test)]
pub(crate) fn render(app: fn() -> dioxus::prelude::Element) -> String {
    let mut dom = dioxus::prelude::VirtualDom::new(app);
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}
