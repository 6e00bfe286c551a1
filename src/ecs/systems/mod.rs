pub mod capture;
pub mod cellar;
pub mod guard;
pub mod lifecycle;
pub mod satellites;
pub mod siege;
