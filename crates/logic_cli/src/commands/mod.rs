pub mod compare;
pub mod evaluate;
pub mod steps;
