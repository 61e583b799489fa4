mod post_create;
mod post_delete;
mod post_list;
mod post_read;
mod post_update_tags;

pub use post_create::create_post;
pub use post_delete::delete_post;
pub use post_list::{list_posts, ListParams, TOTAL_COUNT_HEADER};
pub use post_read::get_post;
pub use post_update_tags::update_post_tags;
