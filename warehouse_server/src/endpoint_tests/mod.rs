mod fulfillment;
mod mocks;
