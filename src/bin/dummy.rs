use chrono::{Duration, Utc};

use corkboard::client::Client;
use corkboard::store::TaskStore;
use corkboard::{DayKey, DayRange, Provider};

#[tokio::main]
async fn main() {
    env_logger::init();

    let base_url = std::env::var("CORKBOARD_URL")
        .expect("CORKBOARD_URL must point to a task API, e.g. https://example.com/api");
    let token = std::env::var("CORKBOARD_TOKEN").ok();

    let mut client = Client::new(&base_url).unwrap();
    client.set_token(token);

    // A month-ish window around today, like a calendar screen would show
    let today = Utc::now().naive_utc().date();
    let range = DayRange::new(
        DayKey::from(today - Duration::days(31)),
        DayKey::from(today + Duration::days(31)),
    );

    let mut provider = Provider::new(client, TaskStore::new());
    provider.refresh(&range).await.unwrap();

    corkboard::utils::print_board(provider.local());
}
