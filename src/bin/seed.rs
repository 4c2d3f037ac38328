// src/bin/seed.rs
// DOCUMENTATION: Loads a fixture file into a running API
// PURPOSE: Create amenities, users, states, cities, places and links over HTTP

use anyhow::{anyhow, bail, Context, Result};
use dotenv::dotenv;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::env;
use std::process;
use std::time::{Duration, Instant};

// --- ANSI colors ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

const DEFAULT_FIXTURE: &str = "data/seed.json";

// --- Fixture layout ---

#[derive(Deserialize, Debug, Default)]
struct Fixture {
    #[serde(default)]
    amenities: Vec<String>,
    #[serde(default)]
    users: Vec<UserFixture>,
    #[serde(default)]
    states: Vec<StateFixture>,
}

#[derive(Deserialize, Debug)]
struct UserFixture {
    email: String,
    password: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

#[derive(Deserialize, Debug)]
struct StateFixture {
    name: String,
    #[serde(default)]
    cities: Vec<CityFixture>,
}

#[derive(Deserialize, Debug)]
struct CityFixture {
    name: String,
    #[serde(default)]
    places: Vec<PlaceFixture>,
}

/// `owner` is a user email, `amenities` are amenity names; every other key
/// is sent to the API unchanged
#[derive(Deserialize, Debug)]
struct PlaceFixture {
    name: String,
    owner: String,
    #[serde(default)]
    amenities: Vec<String>,
    #[serde(flatten)]
    details: Map<String, Value>,
}

#[derive(Debug, Default)]
struct SeedSummary {
    amenities: usize,
    users: usize,
    states: usize,
    cities: usize,
    places: usize,
    links: usize,
    skipped: Vec<String>,
}

// --- Seeder ---

struct Seeder {
    base_url: String,
    client: Client,
    amenity_ids: HashMap<String, String>,
    user_ids: HashMap<String, String>,
    summary: SeedSummary,
}

impl Seeder {
    fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            client,
            amenity_ids: HashMap::new(),
            user_ids: HashMap::new(),
            summary: SeedSummary::default(),
        })
    }

    async fn check_service_status(&self) -> bool {
        match self.client.get(format!("{}/status", self.base_url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// POST a JSON body and return the `id` of the created object
    async fn create(&self, path: &str, body: &Value) -> Result<String> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {} failed", path))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            bail!("POST {} returned HTTP {} - {}", path, status, text);
        }

        let created: Value = response
            .json()
            .await
            .with_context(|| format!("Failed to parse response of POST {}", path))?;

        created["id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("POST {} returned no id", path))
    }

    async fn link(&self, place_id: &str, amenity_id: &str) -> Result<bool> {
        let path = format!("/places/{}/amenities/{}", place_id, amenity_id);
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .send()
            .await
            .with_context(|| format!("POST {} failed", path))?;

        match response.status() {
            StatusCode::CREATED => Ok(true),
            StatusCode::OK => Ok(false),
            status => bail!("POST {} returned HTTP {}", path, status),
        }
    }

    async fn seed_amenities(&mut self, names: &[String]) -> Result<()> {
        for name in names {
            let id = self.create("/amenities", &json!({ "name": name })).await?;
            println!("{}  + amenity {}{}", GREEN, name, RESET);
            self.amenity_ids.insert(name.clone(), id);
            self.summary.amenities += 1;
        }
        Ok(())
    }

    async fn seed_users(&mut self, users: &[UserFixture]) -> Result<()> {
        for user in users {
            let body = json!({
                "email": user.email,
                "password": user.password,
                "first_name": user.first_name,
                "last_name": user.last_name,
            });
            let id = self.create("/users", &body).await?;
            println!("{}  + user {}{}", GREEN, user.email, RESET);
            self.user_ids.insert(user.email.clone(), id);
            self.summary.users += 1;
        }
        Ok(())
    }

    async fn seed_place(&mut self, city_id: &str, place: &PlaceFixture) -> Result<()> {
        let Some(user_id) = self.user_ids.get(&place.owner).cloned() else {
            println!(
                "{}  ! place {} skipped: unknown owner {}{}",
                YELLOW, place.name, place.owner, RESET
            );
            self.summary
                .skipped
                .push(format!("place {} (owner {})", place.name, place.owner));
            return Ok(());
        };

        let mut body = place.details.clone();
        body.insert("name".to_string(), json!(place.name));
        body.insert("user_id".to_string(), json!(user_id));

        let place_id = self
            .create(&format!("/cities/{}/places", city_id), &Value::Object(body))
            .await?;
        println!("{}      + place {}{}", GREEN, place.name, RESET);
        self.summary.places += 1;

        for amenity in &place.amenities {
            match self.amenity_ids.get(amenity).cloned() {
                Some(amenity_id) => {
                    if self.link(&place_id, &amenity_id).await? {
                        self.summary.links += 1;
                    }
                }
                None => {
                    println!("{}        ! unknown amenity {}{}", YELLOW, amenity, RESET);
                    self.summary
                        .skipped
                        .push(format!("amenity {} on {}", amenity, place.name));
                }
            }
        }
        Ok(())
    }

    async fn seed_states(&mut self, states: &[StateFixture]) -> Result<()> {
        for state in states {
            let state_id = self.create("/states", &json!({ "name": state.name })).await?;
            println!("{}  + state {}{}", GREEN, state.name, RESET);
            self.summary.states += 1;

            for city in &state.cities {
                let city_id = self
                    .create(
                        &format!("/states/{}/cities", state_id),
                        &json!({ "name": city.name }),
                    )
                    .await?;
                println!("{}    + city {}{}", GREEN, city.name, RESET);
                self.summary.cities += 1;

                for place in &city.places {
                    self.seed_place(&city_id, place).await?;
                }
            }
        }
        Ok(())
    }

    async fn run(&mut self, fixture: Fixture) -> Result<()> {
        println!("\n{}🔍 Checking service status...{}", CYAN, RESET);
        if !self.check_service_status().await {
            bail!("Service unavailable at {}", self.base_url);
        }
        println!("{}✅ Service available{}\n", GREEN, RESET);

        let started = Instant::now();
        println!("{}🚀 Seeding...{}", BOLD, RESET);

        self.seed_amenities(&fixture.amenities).await?;
        self.seed_users(&fixture.users).await?;
        self.seed_states(&fixture.states).await?;

        self.print_summary(started.elapsed());
        Ok(())
    }

    fn print_summary(&self, elapsed: Duration) {
        let s = &self.summary;
        println!("\n{}📋 Seed Summary{}", BOLD, RESET);
        println!("──────────────────────────────────────");
        println!("{:<20} {:>8}", "Amenities", s.amenities);
        println!("{:<20} {:>8}", "Users", s.users);
        println!("{:<20} {:>8}", "States", s.states);
        println!("{:<20} {:>8}", "Cities", s.cities);
        println!("{:<20} {:>8}", "Places", s.places);
        println!("{:<20} {:>8}", "Amenity links", s.links);
        println!("──────────────────────────────────────");

        if !s.skipped.is_empty() {
            println!("{}⚠️  Skipped {} entries:{}", YELLOW, s.skipped.len(), RESET);
            for entry in &s.skipped {
                println!("  • {}", entry);
            }
        }
        println!(
            "\n{}✨ Done in {:.1}s{}",
            GREEN,
            elapsed.as_secs_f64(),
            RESET
        );
    }
}

fn load_fixture(path: &str) -> Result<Fixture> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid fixture {}", path))
}

async fn seed(base_url: &str, fixture_path: &str) -> Result<()> {
    let fixture = load_fixture(fixture_path)?;
    let mut seeder = Seeder::new(base_url.trim_end_matches('/').to_string())?;
    seeder.run(fixture).await
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let base_url =
        env::var("HBNB_API_URL").unwrap_or_else(|_| "http://localhost:5000/api/v1".to_string());
    let fixture_path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_FIXTURE.to_string());

    if let Err(e) = seed(&base_url, &fixture_path).await {
        println!("{}❌ {:#}{}", RED, e, RESET);
        println!(
            "{}Please ensure hbnb-places is running (cargo run --bin hbnb-places){}",
            YELLOW, RESET
        );
        process::exit(1);
    }
}
