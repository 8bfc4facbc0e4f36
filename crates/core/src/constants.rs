/// Maximum number of job results returned by a listing
pub const JOB_RESULTS_LIMIT: i64 = 500;

/// Name filter value meaning "every task"
pub const ALL_TASKS_FILTER: &str = "all";

/// Task names recorded in job results
pub const TASK_IMPORT_ORDERS: &str = "woo-import-orders";
pub const TASK_IMPORT_SUBSCRIPTIONS: &str = "woo-import-subscriptions";
pub const TASK_IMPORT_GIFT_SUBSCRIPTIONS: &str = "woo-import-gift-subscriptions";
pub const TASK_IMPORT_PRODUCTS: &str = "woo-import-products";
pub const TASK_CREATE_RENEWAL_ORDERS: &str = "create-renewal-orders";
pub const TASK_UPDATE_STOCK_STATUS: &str = "woo-update-stock-status";
pub const TASK_PRODUCT_CLEANUP: &str = "woo-product-cleanup";
pub const TASK_CUSTOMER_CLEANUP: &str = "customer-cleanup";

/// SKU prefix marking gift subscription products
pub const GIFT_SKU_PREFIX: &str = "GIFT";

/// Currency used when the platform does not report one
pub const DEFAULT_CURRENCY: &str = "NOK";
