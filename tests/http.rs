use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

const SALES_CSV: &str = "\
ID,TYPE,DATE,AMOUNT
1,Sale,2024-01-01,10
2,Sale,2024-01-01,5
3,Sale,2024-01-02,7
4,Refund,2024-01-02,3
5,Sale,2025-02-14,20
";

#[derive(Debug, Deserialize)]
struct SummaryRow {
    date: String,
    total_sales: f64,
    num_orders: u64,
}

#[derive(Debug, Deserialize)]
struct Totals {
    total_sales: f64,
    num_orders: u64,
}

#[derive(Debug, Deserialize)]
struct Selection {
    years: Vec<i32>,
    months: Vec<u32>,
    days: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    selection: Selection,
    totals: Totals,
    rows: Vec<SummaryRow>,
}

#[derive(Debug, Deserialize)]
struct OptionsResponse {
    years: Vec<i32>,
    months: Vec<u32>,
    days: Vec<u32>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn write_data_file(name: &str, contents: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("sales_dashboard_http_{}_{}_{name}", std::process::id(), nanos));
    std::fs::write(&path, contents).expect("write data file");
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/health")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(data_path: &str) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_sales_dashboard"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let data_path = write_data_file("sales.csv", SALES_CSV);
    let server = Arc::new(spawn_server(&data_path).await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn get_summary(base_url: &str, query: &str) -> SummaryResponse {
    let response = Client::new()
        .get(format!("{base_url}/api/summary{query}"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_summary_defaults_to_everything() {
    let server = shared_server().await;
    let summary = get_summary(&server.base_url, "").await;

    assert_eq!(summary.selection.years, vec![2024, 2025]);
    assert_eq!(summary.selection.months.len(), 12);
    assert_eq!(summary.selection.days.len(), 31);

    let dates: Vec<&str> = summary.rows.iter().map(|row| row.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2025-02-14"]);
    assert_eq!(summary.rows[0].total_sales, 15.0);
    assert_eq!(summary.rows[0].num_orders, 2);
    assert_eq!(summary.rows[1].total_sales, 7.0);
    assert_eq!(summary.totals.num_orders, 4);
    assert_eq!(summary.totals.total_sales, 42.0);
}

#[tokio::test]
async fn http_summary_filters_are_conjunctive() {
    let server = shared_server().await;

    let february = get_summary(&server.base_url, "?months=2").await;
    assert_eq!(february.rows.len(), 1);
    assert_eq!(february.rows[0].date, "2025-02-14");

    let january_2025 = get_summary(&server.base_url, "?years=2025&months=1").await;
    assert!(january_2025.rows.is_empty());
    assert_eq!(january_2025.totals.num_orders, 0);

    let no_days = get_summary(&server.base_url, "?days=").await;
    assert!(no_days.rows.is_empty());
    assert!(no_days.selection.days.is_empty());
}

#[tokio::test]
async fn http_summary_rejects_bad_selection() {
    let server = shared_server().await;
    let response = Client::new()
        .get(format!("{}/api/summary?months=13", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_options_list_years_in_data() {
    let server = shared_server().await;
    let options: OptionsResponse = Client::new()
        .get(format!("{}/api/options", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(options.years, vec![2024, 2025]);
    assert_eq!(options.months, (1..=12).collect::<Vec<_>>());
    assert_eq!(options.days, (1..=31).collect::<Vec<_>>());
}

#[tokio::test]
async fn http_index_serves_dashboard() {
    let server = shared_server().await;
    let body = Client::new()
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Filter Options"));
    assert!(body.contains("E-Commerce Dashboard"));
}

#[tokio::test]
async fn http_malformed_data_is_unprocessable() {
    let data_path = write_data_file(
        "broken.csv",
        "type,date,amount\nSale,2024-01-01,10\nSale,not-a-date,4\n",
    );
    let server = spawn_server(&data_path).await;
    let response = Client::new()
        .get(format!("{}/api/summary", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().await.unwrap().contains("not-a-date"));
}

#[tokio::test]
async fn http_missing_source_is_unavailable() {
    let server = spawn_server("/nonexistent/sales_dashboard/sales.csv").await;
    let response = Client::new()
        .get(format!("{}/api/summary", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
