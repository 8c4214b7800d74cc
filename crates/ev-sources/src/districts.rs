//! Built-in district table: the 19 districts of Jammu & Kashmir with their
//! centre coordinates.  Order is stable and matches what UIs list.

use ev_core::GeoPoint;

/// `(name, lat, lon)` for every district.
pub const DISTRICTS: &[(&str, f64, f64)] = &[
    ("Anantnag",  33.7327, 75.1487),
    ("Bandipora", 34.4173, 74.6430),
    ("Baramulla", 34.2095, 74.3482),
    ("Budgam",    34.0159, 74.7644),
    ("Ganderbal", 34.2294, 74.7748),
    ("Kupwara",   34.5265, 74.2546),
    ("Pulwama",   33.8740, 74.8994),
    ("Shopian",   33.7171, 74.8346),
    ("Kulgam",    33.6390, 75.0194),
    ("Srinagar",  34.0837, 74.7973),
    ("Jammu",     32.7266, 74.8570),
    ("Udhampur",  32.9244, 75.1357),
    ("Kathua",    32.3690, 75.5250),
    ("Rajouri",   33.3720, 74.3152),
    ("Poonch",    33.7730, 74.0923),
    ("Reasi",     33.0899, 74.8293),
    ("Doda",      33.1453, 75.5456),
    ("Ramban",    33.2425, 75.2441),
    ("Kishtwar",  33.3139, 75.7652),
];

/// District names in table order.
pub fn district_names() -> Vec<&'static str> {
    DISTRICTS.iter().map(|&(name, _, _)| name).collect()
}

/// Table coordinate for `name`, if it is a known district.
pub fn fallback_coord(name: &str) -> Option<GeoPoint> {
    DISTRICTS
        .iter()
        .find(|&&(n, _, _)| n == name)
        .map(|&(_, lat, lon)| GeoPoint::new(lat, lon))
}
