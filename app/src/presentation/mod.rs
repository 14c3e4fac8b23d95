//! Terminal rendering of the catalog. Nothing here talks to the gateway:
//! every module only formats store/view data or collects user input.

pub mod catalog_page;
pub mod delete_prompt;
pub mod song_form;
pub mod song_row;
pub mod video_panel;
