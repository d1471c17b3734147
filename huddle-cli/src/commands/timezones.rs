use crate::render::render_timezones;

pub fn run() {
    println!("{}", render_timezones());
}
