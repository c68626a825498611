//! HTTP integration tests.
//!
//! Starts the router on an ephemeral port over an in-memory database seeded
//! with the demo catalog, and drives it with reqwest.

use pharmacy_api::{router, AppState};
use pharmacy_db::seed::seed_demo;
use pharmacy_db::{Database, DbConfig};
use serde_json::{json, Value};

const PARACETAMOL: i64 = 1;
const COUGH_SYRUP: i64 = 2;
const VITAMIN_C: i64 = 3;

/// Bind to port 0 and return the base URL.
async fn start_server() -> String {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    seed_demo(&db).await.unwrap();

    let app = router(AppState::sequential(db, "INV"));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_check() {
    let base = start_server().await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn list_medicines_with_filters() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let all: Value = client
        .get(format!("{base}/api/medicines"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        names(&all),
        vec!["Cough Syrup 100ml", "Paracetamol 500mg", "Vitamin C"]
    );
    assert_eq!(all[1]["sellingPricePaise"], 2000);

    let low: Value = client
        .get(format!("{base}/api/medicines?lowStock=true"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(names(&low), vec!["Cough Syrup 100ml"]);

    let expiring: Value = client
        .get(format!("{base}/api/medicines?expiring=true"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(names(&expiring), vec!["Vitamin C"]);

    let search: Value = client
        .get(format!("{base}/api/medicines?search=PARA"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(names(&search), vec!["Paracetamol 500mg"]);
}

#[tokio::test]
async fn medicine_crud() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/medicines"))
        .json(&json!({
            "name": "Cetirizine 10mg",
            "category": "Tablet",
            "batchNumber": "C001",
            "expiryDate": "2030-01-31",
            "purchasePricePaise": 300,
            "sellingPricePaise": 550,
            "gstPercentage": 12,
            "stockQuantity": 40
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["minStockLevel"], 10);

    let resp = client
        .put(format!("{base}/api/medicines/{id}"))
        .json(&json!({ "stockQuantity": 5, "sellingPricePaise": 600 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["stockQuantity"], 5);
    assert_eq!(updated["sellingPricePaise"], 600);
    assert_eq!(updated["name"], "Cetirizine 10mg");

    let resp = client
        .get(format!("{base}/api/medicines/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .delete(format!("{base}/api/medicines/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .get(format!("{base}/api/medicines/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "NOT_FOUND");

    let resp = client
        .delete(format!("{base}/api/medicines/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .put(format!("{base}/api/medicines/9999"))
        .json(&json!({ "stockQuantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn invalid_medicine_rejected() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/medicines"))
        .json(&json!({
            "name": "Broken",
            "category": "Tablet",
            "batchNumber": "X1",
            "expiryDate": "2030-01-31",
            "purchasePricePaise": 100,
            "sellingPricePaise": -5,
            "gstPercentage": 12,
            "stockQuantity": 1
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let resp = client
        .post(format!("{base}/api/medicines"))
        .json(&json!({
            "name": "Broken",
            "category": "Lozenge",
            "batchNumber": "X1",
            "expiryDate": "2030-01-31",
            "purchasePricePaise": 100,
            "sellingPricePaise": 200,
            "gstPercentage": 12,
            "stockQuantity": 1
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .put(format!("{base}/api/medicines/{PARACETAMOL}"))
        .json(&json!({ "stockQuantity": -1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn suppliers_create_and_list() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/suppliers"))
        .json(&json!({
            "name": "Apex Pharma",
            "contactNumber": "9123456780",
            "address": "Pune",
            "gstNumber": "27BBBBB1111B1Z5"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let list: Value = client
        .get(format!("{base}/api/suppliers"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(names(&list), vec!["Apex Pharma", "MediPharma Distributors"]);

    let resp = client
        .post(format!("{base}/api/suppliers"))
        .json(&json!({
            "name": "",
            "contactNumber": "9123456780",
            "address": "Pune",
            "gstNumber": ""
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn checkout_flow() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/invoices"))
        .json(&json!({
            "customerName": "Ravi Kumar",
            "customerMobile": "9000000001",
            "customerAddress": "Andheri",
            "items": [{ "medicineId": PARACETAMOL, "quantity": 2 }],
            "paymentMode": "UPI"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let invoice: Value = resp.json().await.unwrap();
    assert!(invoice["invoiceNumber"].as_str().unwrap().starts_with("INV-"));
    assert_eq!(invoice["subtotal"], 40.0);
    assert_eq!(invoice["gstTotal"], 4.8);
    assert_eq!(invoice["discount"], 0.0);
    assert_eq!(invoice["grandTotal"], 44.8);
    assert_eq!(invoice["paymentMode"], "UPI");
    let id = invoice["id"].as_i64().unwrap();

    let medicine: Value = client
        .get(format!("{base}/api/medicines/{PARACETAMOL}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(medicine["stockQuantity"], 98);

    let details: Value = client
        .get(format!("{base}/api/invoices/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(details["invoiceNumber"], invoice["invoiceNumber"]);
    assert_eq!(details["customer"]["name"], "Ravi Kumar");
    assert_eq!(details["items"][0]["medicineName"], "Paracetamol 500mg");
    assert_eq!(details["items"][0]["medicineCategory"], "Tablet");
    assert_eq!(details["items"][0]["totalAmountPaise"], 4480);
    assert_eq!(details["items"][0]["batchNumber"], "B123");

    let list: Value = client
        .get(format!("{base}/api/invoices"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    let customers: Value = client
        .get(format!("{base}/api/customers?search=0001"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(names(&customers), vec!["Ravi Kumar"]);

    let stats: Value = client
        .get(format!("{base}/api/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["totalMedicines"], 3);
    assert_eq!(stats["lowStockItems"], 1);
    assert_eq!(stats["expiringSoonItems"], 1);
    assert_eq!(stats["todaysSalesPaise"], 4480);
    assert_eq!(stats["totalCustomers"], 1);
}

#[tokio::test]
async fn checkout_with_discount_in_rupees() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/invoices"))
        .json(&json!({
            "customerName": "Asha",
            "customerMobile": "9000000003",
            "items": [{ "medicineId": PARACETAMOL, "quantity": 5 }],
            "discount": 10
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let invoice: Value = resp.json().await.unwrap();
    assert_eq!(invoice["subtotal"], 100.0);
    assert_eq!(invoice["gstTotal"], 12.0);
    assert_eq!(invoice["discount"], 10.0);
    assert_eq!(invoice["grandTotal"], 102.0);
    assert_eq!(invoice["paymentMode"], "Cash");

    let stats: Value = client
        .get(format!("{base}/api/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["todaysSalesPaise"], 10_200);
}

#[tokio::test]
async fn checkout_failures() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    // Cough syrup has 5 on hand.
    let resp = client
        .post(format!("{base}/api/invoices"))
        .json(&json!({
            "customerName": "Meera",
            "customerMobile": "9000000002",
            "items": [
                { "medicineId": VITAMIN_C, "quantity": 1 },
                { "medicineId": COUGH_SYRUP, "quantity": 6 }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");
    assert!(body["message"].as_str().unwrap().contains("Cough Syrup 100ml"));

    let resp = client
        .post(format!("{base}/api/invoices"))
        .json(&json!({
            "customerName": "Meera",
            "customerMobile": "9000000002",
            "items": [{ "medicineId": 999, "quantity": 1 }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .post(format!("{base}/api/invoices"))
        .json(&json!({
            "customerName": "Meera",
            "customerMobile": "9000000002",
            "items": []
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Misspelt discount field.
    let resp = client
        .post(format!("{base}/api/invoices"))
        .json(&json!({
            "customerName": "Meera",
            "customerMobile": "9000000002",
            "items": [{ "medicineId": PARACETAMOL, "quantity": 1 }],
            "discountPaise": 1000
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let resp = client
        .post(format!("{base}/api/invoices"))
        .json(&json!({
            "customerName": "Meera",
            "customerMobile": "9000000002",
            "items": [{ "medicineId": PARACETAMOL, "quantity": 1 }],
            "discount": -5
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .post(format!("{base}/api/invoices"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Nothing was written.
    let stats: Value = client
        .get(format!("{base}/api/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["todaysSalesPaise"], 0);
    assert_eq!(stats["totalCustomers"], 0);

    let syrup: Value = client
        .get(format!("{base}/api/medicines/{COUGH_SYRUP}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(syrup["stockQuantity"], 5);
    let vitamin: Value = client
        .get(format!("{base}/api/medicines/{VITAMIN_C}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(vitamin["stockQuantity"], 50);

    let resp = client
        .get(format!("{base}/api/invoices/42"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
