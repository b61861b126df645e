pub mod bands;
pub mod vector2d;
