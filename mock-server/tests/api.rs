use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_pets, Pet, PetInput};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn seeded() -> axum::Router {
    app_with_pets([
        PetInput {
            nombre: "Rex".to_string(),
            raza: "Labrador".to_string(),
            edad: 3,
        },
        PetInput {
            nombre: "Luna".to_string(),
            raza: "Siamese".to_string(),
            edad: 2,
        },
    ])
}

// --- list ---

#[tokio::test]
async fn list_pets_empty() {
    let resp = app().oneshot(empty_request("GET", "/pets/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let pets: Vec<Pet> = body_json(resp).await;
    assert!(pets.is_empty());
}

#[tokio::test]
async fn list_pets_seeded_in_id_order() {
    let resp = seeded().oneshot(empty_request("GET", "/pets/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let pets: Vec<Pet> = body_json(resp).await;
    let ids: Vec<u64> = pets.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(pets[0].nombre, "Rex");
}

#[tokio::test]
async fn list_pets_without_trailing_slash() {
    let resp = seeded().oneshot(empty_request("GET", "/pets")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- create ---

#[tokio::test]
async fn create_pet_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/pets/",
            r#"{"nombre":"Max","raza":"Pug","edad":4}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let pet: Pet = body_json(resp).await;
    assert_eq!(pet.id, 1);
    assert_eq!(pet.nombre, "Max");
    assert_eq!(pet.edad, 4);
}

#[tokio::test]
async fn create_pet_missing_field_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/pets/", r#"{"nombre":"Max"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_pet_not_found() {
    let resp = app().oneshot(empty_request("GET", "/pets/1/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_pet_bad_id_returns_400() {
    let resp = app().oneshot(empty_request("GET", "/pets/rex/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_pet_replaces_every_field() {
    let resp = seeded()
        .oneshot(json_request(
            "PUT",
            "/pets/2/",
            r#"{"id":2,"nombre":"Luna","raza":"Persian","edad":5}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let pet: Pet = body_json(resp).await;
    assert_eq!(
        pet,
        Pet {
            id: 2,
            nombre: "Luna".to_string(),
            raza: "Persian".to_string(),
            edad: 5,
        }
    );
}

#[tokio::test]
async fn update_pet_path_id_wins() {
    let resp = seeded()
        .oneshot(json_request(
            "PUT",
            "/pets/1",
            r#"{"id":2,"nombre":"Bruno","raza":"Labrador","edad":3}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let pet: Pet = body_json(resp).await;
    assert_eq!(pet.id, 1);
    assert_eq!(pet.nombre, "Bruno");
}

#[tokio::test]
async fn update_pet_not_found() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/pets/7/",
            r#"{"nombre":"Nope","raza":"","edad":0}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_pet_not_found() {
    let resp = app().oneshot(empty_request("DELETE", "/pets/7/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/pets/",
            r#"{"nombre":"Rex","raza":"Labrador","edad":3}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Pet = body_json(resp).await;
    let id = created.id;

    // list — should contain the one pet
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/pets/"))
        .await
        .unwrap();
    let pets: Vec<Pet> = body_json(resp).await;
    assert_eq!(pets, vec![created.clone()]);

    // update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/pets/{id}/"),
            r#"{"nombre":"Rex","raza":"Labrador","edad":4}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Pet = body_json(resp).await;
    assert_eq!(updated.edad, 4);

    // get reflects the update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/pets/{id}/")))
        .await
        .unwrap();
    let fetched: Pet = body_json(resp).await;
    assert_eq!(fetched, updated);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/pets/{id}/")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // list after delete — empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/pets/"))
        .await
        .unwrap();
    let pets: Vec<Pet> = body_json(resp).await;
    assert!(pets.is_empty());
}
