mod print;

pub(crate) use print::{print_config, print_messages, print_project_detail, print_projects};
