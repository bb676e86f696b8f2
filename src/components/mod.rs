pub mod back_to_top;
pub mod counter;
pub mod notification;
pub mod reveal;
