pub(crate) mod app_shell;

pub(crate) use app_shell::AppShell;
