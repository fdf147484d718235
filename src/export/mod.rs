pub mod dot;
pub mod html;
