use hey_phases::error::AppResult;

fn main() -> AppResult<()> {
    hey_phases::entry::run()
}
