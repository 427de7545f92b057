use crate::{Join, Order, Page, Projection, Selector};

/// Everything a `SELECT` of rows can be shaped with.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct GetOptions {
    pub selectors: Vec<Selector>,
    pub orders: Vec<Order>,
    pub page: Option<Page>,
    pub joins: Vec<Join>,
    pub projections: Vec<Projection>,
    /// Append `FOR UPDATE`.
    pub lock: bool,
}

impl GetOptions {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn selector(mut self, selector: Selector) -> Self {
        self.selectors.push(selector);
        self
    }
    pub fn order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }
    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }
    pub fn projection(mut self, projection: Projection) -> Self {
        self.projections.push(projection);
        self
    }
    pub fn lock(mut self, lock: bool) -> Self {
        self.lock = lock;
        self
    }
}

#[derive(Default, Clone, Debug, PartialEq)]
pub struct CountOptions {
    pub selectors: Vec<Selector>,
    pub joins: Vec<Join>,
}

impl CountOptions {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn selector(mut self, selector: Selector) -> Self {
        self.selectors.push(selector);
        self
    }
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }
}

impl From<&GetOptions> for CountOptions {
    fn from(value: &GetOptions) -> Self {
        Self {
            selectors: value.selectors.clone(),
            joins: value.joins.clone(),
        }
    }
}

#[derive(Default, Clone, Debug, PartialEq)]
pub struct DeleteOptions {
    pub limit: Option<u64>,
    pub orders: Vec<Order>,
}

impl DeleteOptions {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
    pub fn order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }
}
