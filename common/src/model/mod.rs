pub mod component;
pub mod document;
pub mod template;
pub mod variable;
