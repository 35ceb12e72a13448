use std::collections::HashMap;
use std::sync::Mutex;

use crate::modules::addresses::entities::address;
use crate::modules::cart::entities::{cart, order_item};
use crate::modules::catalog::entities::{category, product, sub_category};
use crate::modules::orders::entities::order;
use crate::modules::payments::entities::payment;
use crate::modules::reviews::entities::review;
use crate::modules::shipments::entities::{shipment, shipment_tracking};
use crate::modules::users::entities::user;

/// Backing store shared by the in-memory repositories. One instance is built
/// per dev server (or test) and handed to every repository, so cross-module
/// operations such as checkout see a consistent view.
#[derive(Default)]
pub struct MemoryStore {
    pub users: Mutex<HashMap<i32, user::Model>>,
    pub addresses: Mutex<HashMap<i32, address::Model>>,
    pub categories: Mutex<HashMap<i32, category::Model>>,
    pub sub_categories: Mutex<HashMap<i32, sub_category::Model>>,
    pub products: Mutex<HashMap<i32, product::Model>>,
    pub carts: Mutex<HashMap<i32, cart::Model>>,
    pub order_items: Mutex<HashMap<i32, order_item::Model>>,
    pub orders: Mutex<HashMap<i32, order::Model>>,
    pub payments: Mutex<HashMap<i32, payment::Model>>,
    pub shipments: Mutex<HashMap<i32, shipment::Model>>,
    pub shipment_trackings: Mutex<HashMap<i32, shipment_tracking::Model>>,
    pub reviews: Mutex<HashMap<i32, review::Model>>,
    counter: Mutex<i32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> i32 {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        *counter
    }
}
