//! The HTTP calls of the client, with the shapes of the API responses.

use std::io::{self, Write as _};

use anyhow::{Context as _, anyhow};
use prettytable::row;
use reqwest::StatusCode;
use serde::Deserialize;

pub struct ApiClient {
    client: reqwest::Client,
    base_url: Option<String>,
    credentials: Option<Credentials>,
}

struct Credentials {
    login: String,
    token: String,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    message: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Deserialize)]
struct Professor {
    id: String,
    name: String,
    rating: u8,
}

#[derive(Deserialize)]
struct Module {
    code: String,
    name: String,
}

#[derive(Deserialize)]
struct ModuleInstance {
    module: Module,
    year: i32,
    semester: u8,
    professors: Vec<Professor>,
}

#[derive(Deserialize)]
struct ModuleAverage {
    professor_id: String,
    professor_name: String,
    module_code: String,
    module_name: String,
    average_rating: u8,
}

fn prompt(message: &str) -> anyhow::Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

fn stars(rating: u8) -> String {
    "*".repeat(rating as usize)
}

/// Turns an error response of the API into a printable error.
async fn api_error(res: reqwest::Response) -> anyhow::Error {
    let status = res.status();
    match res.json::<ApiErrorResponse>().await {
        Ok(err) => anyhow!("{} ({status})", err.message),
        Err(_) => anyhow!("server returned {status}"),
    }
}

impl ApiClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.map(normalize_url),
            credentials: None,
        }
    }

    fn base_url(&self) -> anyhow::Result<&str> {
        self.base_url
            .as_deref()
            .ok_or_else(|| anyhow!("no server URL set, log in first with: login <url>"))
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> anyhow::Result<reqwest::RequestBuilder> {
        let creds = self
            .credentials
            .as_ref()
            .ok_or_else(|| anyhow!("you must be logged in first"))?;
        Ok(req
            .header("UserLogin", &creds.login)
            .header("Authorization", &creds.token))
    }

    pub async fn register(&self) -> anyhow::Result<()> {
        let base = self.base_url()?;

        let username = prompt("Username: ")?;
        let email = prompt("Email: ")?;
        let password = prompt("Password: ")?;

        let res = self
            .client
            .post(format!("{base}/user/register"))
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .context("could not reach the server")?;

        if !res.status().is_success() {
            return Err(api_error(res).await).context("registration failed");
        }

        println!("Registration successful!");
        Ok(())
    }

    pub async fn login(&mut self, url: &str) -> anyhow::Result<()> {
        let url = normalize_url(url.to_owned());

        let username = prompt("Username: ")?;
        let password = prompt("Password: ")?;

        let res = self
            .client
            .post(format!("{url}/user/login"))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .context("could not reach the server")?;

        if !res.status().is_success() {
            return Err(api_error(res).await).context("login failed");
        }

        let LoginResponse { token } = res.json().await?;
        self.base_url = Some(url);
        self.credentials = Some(Credentials {
            login: username,
            token,
        });

        println!("Login successful!");
        Ok(())
    }

    pub fn logout(&mut self) {
        self.credentials = None;
        println!("Logged out successfully.");
    }

    pub async fn list_instances(&self) -> anyhow::Result<()> {
        let base = self.base_url()?;

        let res = self
            .client
            .get(format!("{base}/module-instances"))
            .send()
            .await
            .context("could not reach the server")?;
        if !res.status().is_success() {
            return Err(api_error(res).await);
        }

        let instances: Vec<ModuleInstance> = res.json().await?;
        if instances.is_empty() {
            println!("No module instances found");
            return Ok(());
        }

        let mut table =
            prettytable::Table::init(vec![row!["Code", "Name", "Year", "Semester", "Taught by"]]);

        for instance in instances {
            let professors = instance
                .professors
                .iter()
                .map(|p| format!("{}, {}", p.id, p.name))
                .collect::<Vec<_>>()
                .join("\n");

            table.add_row(row![
                instance.module.code,
                instance.module.name,
                instance.year,
                instance.semester,
                professors
            ]);
        }

        println!("{table}");
        Ok(())
    }

    pub async fn view_professors(&self) -> anyhow::Result<()> {
        let base = self.base_url()?;

        let res = self
            .client
            .get(format!("{base}/professors"))
            .send()
            .await
            .context("could not reach the server")?;
        if !res.status().is_success() {
            return Err(api_error(res).await);
        }

        let professors: Vec<Professor> = res.json().await?;
        if professors.is_empty() {
            println!("No professor ratings found");
            return Ok(());
        }

        for professor in professors {
            println!(
                "The rating of {} ({}) is {}",
                professor.name,
                professor.id,
                stars(professor.rating)
            );
        }
        Ok(())
    }

    pub async fn average(&self, professor_id: &str, module_code: &str) -> anyhow::Result<()> {
        let base = self.base_url()?;

        let res = self
            .client
            .get(format!(
                "{base}/professors/{professor_id}/modules/{module_code}/average"
            ))
            .send()
            .await
            .context("could not reach the server")?;

        if res.status() == StatusCode::NO_CONTENT {
            println!("No ratings found for this combination");
            return Ok(());
        }
        if !res.status().is_success() {
            return Err(api_error(res).await);
        }

        let average: ModuleAverage = res.json().await?;
        println!(
            "The rating of {} ({}) in module {} ({}) is {}",
            average.professor_name,
            average.professor_id,
            average.module_name,
            average.module_code,
            stars(average.average_rating)
        );
        Ok(())
    }

    pub async fn rate(
        &self,
        professor_id: &str,
        module_code: &str,
        year: i32,
        semester: u8,
        rating: u8,
    ) -> anyhow::Result<()> {
        let base = self.base_url()?;

        let req = self.client.post(format!("{base}/ratings"));
        let res = self
            .authed(req)?
            .json(&serde_json::json!({
                "professor": professor_id,
                "module_code": module_code,
                "year": year,
                "semester": semester,
                "rating": rating,
            }))
            .send()
            .await
            .context("could not reach the server")?;

        if !res.status().is_success() {
            return Err(api_error(res).await).context("rating submission failed");
        }

        println!("Rating submitted successfully!");
        Ok(())
    }
}

fn normalize_url(url: String) -> String {
    let url = url.trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_owned()
    } else {
        format!("http://{url}")
    }
}
