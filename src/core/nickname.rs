use rand::Rng;

/// Adjectives for the first part of the nickname. The list carries a few
/// repeated entries on purpose; repeats weight the draw toward them.
pub const ADJECTIVES: &[&str] = &[
    "Swift", "Bold", "Clever", "Bright", "Calm", "Cool", "Fast", "Fierce", "Gentle", "Happy",
    "Kind", "Lucky", "Mighty", "Noble", "Quick", "Rapid", "Silent", "Smart", "Swift", "Tough",
    "Wise", "Brave", "Clever", "Daring", "Eager", "Fancy", "Golden", "Jolly", "Lively", "Merry",
    "Proud", "Royal", "Sharp", "Smooth", "Stellar", "Vivid", "Witty", "Zesty", "Amber", "Azure",
    "Crimson", "Emerald", "Ivory", "Jade", "Magenta", "Navy", "Olive", "Purple", "Ruby",
    "Sapphire", "Teal", "Violet", "Amber", "Bronze", "Copper", "Silver",
];

/// Animals and nouns for the second part, weighted the same way.
pub const NOUNS: &[&str] = &[
    "Tiger", "Eagle", "Lion", "Wolf", "Bear", "Hawk", "Fox", "Panther", "Falcon", "Jaguar",
    "Leopard", "Cheetah", "Dolphin", "Shark", "Whale", "Dragon", "Phoenix", "Griffin", "Unicorn",
    "Pegasus", "Elephant", "Rhino", "Hippo", "Giraffe", "Zebra", "Panda", "Koala", "Penguin",
    "Owl", "Raven", "Swan", "Peacock", "Falcon", "Hawk", "Eagle", "Osprey", "Kestrel", "Vulture",
    "Stallion", "Mustang", "Stallion", "Colt", "Mare", "Pony", "Camel", "Llama", "Alpaca",
    "Bison", "Buffalo", "Elk", "Deer", "Moose", "Caribou", "Antelope", "Gazelle", "Impala",
    "Springbok", "Wildebeest", "Yak", "Bison", "Ox", "Bull",
];

/// Generates a random nickname like "PurpleElephant42" or "SwiftTiger89":
/// one adjective, one noun and a number in 0..=99, no separators.
pub fn generate_nickname() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.gen_range(0..NOUNS.len())];
    let number: u32 = rng.gen_range(0..100);

    format!("{}{}{}", adjective, noun, number)
}

/// Draws `count` independent nicknames. Duplicates across draws are
/// possible; callers wanting a unique name go through the resolver.
pub fn generate_nicknames(count: usize) -> Vec<String> {
    (0..count).map(|_| generate_nickname()).collect()
}
