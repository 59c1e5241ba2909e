use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 21K gold is 21/24 pure: `rate24k = rate21k / GOLD_21K_TO_24K_RATIO`.
pub const GOLD_21K_TO_24K_RATIO: Decimal = dec!(0.875);

/// 21/18 rounded to four places: `rate18k = rate21k / GOLD_21K_TO_18K_RATIO`.
pub const GOLD_21K_TO_18K_RATIO: Decimal = dec!(1.1667);

/// Number of history entries shown in the savings preview.
pub const DEFAULT_RECENT_HISTORY_LIMIT: usize = 5;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Energy content of one kilogram of body fat, in kcal.
pub const KCAL_PER_KG: f64 = 7700.0;

/// Lowest daily calorie limit the goal calculator will suggest.
pub const MIN_DAILY_CALORIES_FEMALE: f64 = 1200.0;
pub const MIN_DAILY_CALORIES_MALE: f64 = 1500.0;

/// Document collections, one JSON value per `(user, collection, document id)`.
pub const SAVINGS_COLLECTION: &str = "savings";
pub const RATE_HISTORY_COLLECTION: &str = "rateHistory";
pub const CALORIE_GOAL_COLLECTION: &str = "calorieGoal";
pub const CALORIE_DAYS_COLLECTION: &str = "calorieDays";
pub const SPENDING_COLLECTION: &str = "spending";

/// Document id used by collections that hold a single document per user.
pub const SINGLETON_DOCUMENT_ID: &str = "current";
