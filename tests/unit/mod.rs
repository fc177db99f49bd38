mod actions;
mod table_view;
