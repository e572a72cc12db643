mod app;
mod capture;
mod convert;
mod effects;
mod panel;
mod store;
mod surface;
mod term;

fn main() -> anyhow::Result<()> {
    app::run_app()
}
