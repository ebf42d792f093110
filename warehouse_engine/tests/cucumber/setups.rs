use chrono::Duration;
use cucumber::given;
use warehouse_engine::{
    db_types::NewStockMovement,
    test_utils::seed::{insert_order, insert_product, insert_stock_movement, insert_warehouse},
};
use wms_common::Money;

use crate::cucumber::{world::FulfillmentSystem, WarehouseWorld};

#[given("a fresh install")]
async fn fresh_database(world: &mut WarehouseWorld) {
    let system = FulfillmentSystem::new().await;
    world.system = Some(system);
}

#[given(expr = "product {int} with unit price {word}")]
async fn product(world: &mut WarehouseWorld, id: i64, price: String) {
    let price = price.parse::<Money>().expect("Not a valid price");
    insert_product(world.api().db().pool(), id, price).await;
}

#[given(expr = "warehouse {int}")]
async fn warehouse(world: &mut WarehouseWorld, id: i64) {
    insert_warehouse(world.api().db().pool(), id).await;
}

#[given(regex = r"^order (\d+) for (\d+) units of product (\d+) placed (\d+) (\w+) (before|after) the delivery$")]
async fn order(
    world: &mut WarehouseWorld,
    id: i64,
    amount: i64,
    product_id: i64,
    count: i64,
    unit: String,
    relation: String,
) {
    let offset = match unit.as_str() {
        "minutes" => Duration::minutes(count),
        "milliseconds" => Duration::milliseconds(count),
        _ => panic!("Unsupported time unit: {unit}"),
    };
    let delivery_time = world.system().delivery_time;
    let created_at = if relation == "before" { delivery_time - offset } else { delivery_time + offset };
    insert_order(world.api().db().pool(), id, product_id, amount, created_at).await;
}

#[given(expr = "a stock movement already exists for order {int}")]
async fn existing_movement(world: &mut WarehouseWorld, order_id: i64) {
    let order = world.api().order(order_id).await.expect("Error fetching order").expect("Order does not exist");
    let movement = NewStockMovement {
        warehouse_id: 1,
        product_id: order.product_id,
        order_id,
        amount: order.amount,
        price: Money::from(0),
        created_at: world.system().delivery_time - Duration::minutes(1),
    };
    insert_stock_movement(world.api().db().pool(), movement).await;
}
