use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: u64,
    pub nombre: String,
    pub raza: String,
    pub edad: u32,
}

/// Body of a create or full replacement. Unknown fields, `id` included,
/// are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct PetInput {
    pub nombre: String,
    pub raza: String,
    pub edad: u32,
}

#[derive(Debug, Default)]
pub struct Collection {
    pets: BTreeMap<u64, Pet>,
    last_id: u64,
}

impl Collection {
    fn insert(&mut self, input: PetInput) -> Pet {
        self.last_id += 1;
        let pet = Pet {
            id: self.last_id,
            nombre: input.nombre,
            raza: input.raza,
            edad: input.edad,
        };
        self.pets.insert(pet.id, pet.clone());
        pet
    }
}

pub type Db = Arc<RwLock<Collection>>;

pub fn app() -> Router {
    app_with_pets(Vec::new())
}

/// Router over a collection seeded with `pets`, assigned ids from 1.
pub fn app_with_pets(pets: impl IntoIterator<Item = PetInput>) -> Router {
    let mut collection = Collection::default();
    for input in pets {
        collection.insert(input);
    }
    let db: Db = Arc::new(RwLock::new(collection));
    Router::new()
        .route("/pets/", get(list_pets).post(create_pet))
        .route("/pets", get(list_pets).post(create_pet))
        .route("/pets/{id}/", get(get_pet).put(update_pet).delete(delete_pet))
        .route("/pets/{id}", get(get_pet).put(update_pet).delete(delete_pet))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_pets(State(db): State<Db>) -> Json<Vec<Pet>> {
    let collection = db.read().await;
    Json(collection.pets.values().cloned().collect())
}

async fn create_pet(State(db): State<Db>, Json(input): Json<PetInput>) -> (StatusCode, Json<Pet>) {
    let pet = db.write().await.insert(input);
    debug!(id = pet.id, "pet created");
    (StatusCode::CREATED, Json(pet))
}

async fn get_pet(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Pet>, StatusCode> {
    let collection = db.read().await;
    collection.pets.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_pet(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<PetInput>,
) -> Result<Json<Pet>, StatusCode> {
    let mut collection = db.write().await;
    let pet = collection.pets.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    pet.nombre = input.nombre;
    pet.raza = input.raza;
    pet.edad = input.edad;
    debug!(id, "pet replaced");
    Ok(Json(pet.clone()))
}

async fn delete_pet(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    let mut collection = db.write().await;
    collection
        .pets
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
