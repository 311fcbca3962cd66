pub mod notice_banner;
pub mod review_form;
pub mod reviews_list;
pub mod star_rating;
pub mod summary_banner;
