//! Built-in catalogue used to seed the store and as the public fallback

use super::menu_item::MenuItem;

pub struct SeedDish {
    pub title: &'static str,
    pub description: &'static str,
    pub price: f64,
    pub category: &'static str,
}

const fn dish(title: &'static str, price: f64, category: &'static str, description: &'static str) -> SeedDish {
    SeedDish { title, description, price, category }
}

/// Rating given to dishes written by the seeder.
pub const SEEDED_RATING: f64 = 4.2;

pub const FALLBACK_IMAGE: &str = "/logo.jpg";

pub const SEED_MENU: &[SeedDish] = &[
    dish("Veg Steam MoMo", 180.0, "MoMo", "Fluffy steamed vegetarian momo with house chutney."),
    dish("Veg Fried MoMo", 210.0, "MoMo", "Crisp fried momo filled with seasoned vegetables."),
    dish("Veg Kothey MoMo", 190.0, "MoMo", "Half-steamed, half-pan-seared vegetarian kothey momo."),
    dish("Veg Chilly MoMo", 230.0, "MoMo", "Stir-fried vegetarian momo tossed in spicy sauce."),
    dish("Veg Chiso Jhol MoMo", 190.0, "MoMo", "Cold broth momo with tangy, refreshing jhol."),
    dish("Veg Tato Jhol MoMo", 220.0, "MoMo", "Warm, comforting broth poured over veggie momo."),
    dish("Chicken Steam MoMo", 200.0, "MoMo", "Juicy chicken momo steamed to perfection."),
    dish("Chicken Fried MoMo", 230.0, "MoMo", "Golden fried chicken momo for an extra crunch."),
    dish("Chicken Kothey MoMo", 210.0, "MoMo", "Pan-seared kothey momo packed with chicken."),
    dish("Chicken Chilly MoMo", 250.0, "MoMo", "Chicken momo tossed with peppers and chilli sauce."),
    dish("Chicken Chiso Jhol MoMo", 210.0, "MoMo", "Chilled spicy broth poured over chicken momo."),
    dish("Chicken Tato Jhol MoMo", 240.0, "MoMo", "Hot savoury broth poured over chicken momo."),
    dish("Mustang Alu", 295.0, "Veg Snacks", "Spiced potato cubes inspired by Mustang flavours."),
    dish("Wai Wai Sadeko", 155.0, "Veg Snacks", "Crispy Wai Wai noodles tossed with fresh herbs."),
    dish("Peanut Sadeko", 185.0, "Veg Snacks", "Roasted peanuts mixed with chilli, lime and spices."),
    dish("Bhatmas Sadeko", 165.0, "Veg Snacks", "Crunchy soybeans tossed with chilli and garlic."),
    dish("Paneer Pakoda", 325.0, "Veg Snacks", "Golden fried paneer fritters with house chutney."),
    dish("Veg Saute", 215.0, "Veg Snacks", "Seasonal vegetables sautéed with garlic and chilli."),
    dish("Mushroom Chilly", 275.0, "Veg Snacks", "Button mushrooms tossed in spicy Indo-Nepali sauce."),
    dish("Corn Salt & Pepper", 255.0, "Veg Snacks", "Crispy sweet corn seasoned with salt and pepper."),
    dish("French Fries", 195.0, "Veg Snacks", "Classic fries with Urban Bhatti seasoning."),
    dish("Masala Fries", 215.0, "Veg Snacks", "Fries dusted with our signature masala mix."),
    dish("Chicken Chilly", 355.0, "Non Veg Snacks", "Chicken strips tossed with peppers and chilli sauce."),
    dish("Chicken Hot Wings", 395.0, "Non Veg Snacks", "House hot-sauce glazed crispy chicken wings."),
    dish("Chicken Buffalo Wings", 395.0, "Non Veg Snacks", "Buffalo-style wings served with creamy dip."),
    dish("Chicken Lollipop", 345.0, "Non Veg Snacks", "Crisp fried lollipop wings with tangy sauce."),
    dish("Chicken Sadeko", 365.0, "Non Veg Snacks", "Smoky chicken salad with chilli and lime."),
    dish("Chicken Sausage", 265.0, "Non Veg Snacks", "Grilled chicken sausages served with mustard."),
    dish("Pork Chilly", 315.0, "Non Veg Snacks", "Wok-tossed pork strips with chilli and garlic."),
    dish("Chicken Sekuwa", 365.0, "Poleko", "Char-grilled chicken sekuwa straight from the bhatti."),
    dish("Pork Sekuwa", 295.0, "Poleko", "Smoky pork sekuwa marinated in house spices."),
    dish("Poleko Wings", 395.0, "Poleko", "Signature poleko wings with fire-kissed glaze."),
    dish("Local Chicken Poleko", 800.0, "Poleko", "Whole local chicken roasted Nepali poleko style."),
    dish("Chicken Biryani", 425.0, "Biryani", "Aromatic chicken biryani finished with fried onions."),
];

pub fn category_image(category: &str) -> &'static str {
    match category {
        "MoMo" => "https://image.pollinations.ai/prompt/Top%20view%20of%20steamed%20Nepali%20momo%20dumplings%20on%20a%20plate%2C%20food%20photography",
        "Veg Snacks" => "https://image.pollinations.ai/prompt/Crispy%20Mustang%20Alu%20with%20spices%2C%20Nepali%20vegetarian%20snack%2C%20food%20photography",
        "Non Veg Snacks" => "https://image.pollinations.ai/prompt/Assorted%20Nepali%20non-veg%20snacks%20on%20wooden%20board%2C%20appetizing%20food%20photo",
        "Poleko" => "https://image.pollinations.ai/prompt/Nepali%20style%20chicken%20poleko%20wings%20on%20a%20grill%2C%20smoky%20food%20photography",
        "Biryani" => "https://image.pollinations.ai/prompt/Hot%20chicken%20biryani%20served%20in%20copper%20handi%2C%20steam%20rising%2C%20food%20magazine%20shot",
        _ => FALLBACK_IMAGE,
    }
}

/// Deterministic display rating in `[3.8, 4.9]`, one decimal place.
pub fn generate_rating(key: &str) -> f64 {
    let base = 4.1 + (key.chars().count() % 4) as f64 * 0.2;
    (base.clamp(3.8, 4.9) * 10.0).round() / 10.0
}

impl SeedDish {
    pub fn to_menu_item(&self, id: String, rating: f64) -> MenuItem {
        MenuItem {
            id,
            title: self.title.to_string(),
            description: self.description.to_string(),
            price: self.price,
            category: self.category.to_string(),
            image_url: category_image(self.category).to_string(),
            is_available: true,
            rating,
        }
    }
}

/// Catalogue served when the store is empty or unreachable.
pub fn fallback_menu() -> Vec<MenuItem> {
    SEED_MENU
        .iter()
        .enumerate()
        .map(|(i, d)| d.to_menu_item(format!("fallback-{}", i + 1), generate_rating(d.title)))
        .collect()
}
