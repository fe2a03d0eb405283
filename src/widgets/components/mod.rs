pub mod editable_object;
