pub mod aim;
pub mod finger_control;
pub mod tap;
