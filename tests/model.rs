use aria_protocol::sans::{
    mac::{MacAddress, SerialError},
    measurement::{ScaleMeasurement, body_fat_percent, weight_kg, weight_lbs},
    response::{Gender, ProfileError, ProfileName, UserProfile, WeightUnit},
};

#[test]
fn weight_conversions() {
    assert_eq!(weight_kg(72_450), 72.45);
    assert_eq!(weight_kg(0), 0.0);
    assert!((weight_lbs(453_592) - 1000.0).abs() < 1e-9);
    assert!((weight_lbs(70_000) - 154.323_709_412_864).abs() < 1e-9);
}

#[test]
fn body_fat_average() {
    assert_eq!(body_fat_percent(0, 0), None);
    assert_eq!(body_fat_percent(300, 320), Some(31.0));
    assert_eq!(body_fat_percent(0, 250), Some(12.5));
    assert_eq!(body_fat_percent(221, 229), Some(22.5));
}

#[test]
fn measurement_accessors() {
    let guest = ScaleMeasurement {
        weight_grams: 81_300,
        timestamp: 1_699_997_200,
        fat_percent_1: 300,
        fat_percent_2: 320,
        ..Default::default()
    };

    assert!(guest.is_guest());
    assert_eq!(guest.weight_kg(), 81.3);
    assert_eq!(guest.body_fat_percent(), Some(31.0));
    assert_eq!(guest.checked_timestamp(), Some(1_699_997_200));

    let user = ScaleMeasurement {
        user_id: 3,
        timestamp: 12,
        ..guest
    };

    assert!(!user.is_guest());
    assert_eq!(user.checked_timestamp(), None);
}

#[test]
fn timestamp_window_is_inclusive() {
    let at = |timestamp| ScaleMeasurement {
        timestamp,
        ..Default::default()
    };

    assert_eq!(at(946_684_799).checked_timestamp(), None);
    assert_eq!(at(946_684_800).checked_timestamp(), Some(946_684_800));
    assert_eq!(at(4_102_444_800).checked_timestamp(), Some(4_102_444_800));
    assert_eq!(at(4_102_444_801).checked_timestamp(), None);
}

#[test]
fn mac_formats() {
    let mac = MacAddress([0x00, 0x24, 0xE4, 0x0a, 0xbc, 0xff]);
    assert_eq!(mac.to_string(), "00:24:E4:0A:BC:FF");
    assert_eq!(mac.serial().to_string(), "0024E40ABCFF");
}

#[test]
fn serial_parses() {
    let mac: MacAddress = " 0024e40aBCff\n".parse().unwrap();
    assert_eq!(mac.octets(), [0x00, 0x24, 0xE4, 0x0A, 0xBC, 0xFF]);
    assert_eq!(mac.serial().to_string(), "0024E40ABCFF");

    assert_eq!("0024E40ABC".parse::<MacAddress>(), Err(SerialError::Length(10)));
    assert_eq!(
        "00:24:E4:0A:BC:FF".parse::<MacAddress>(),
        Err(SerialError::Length(17))
    );
    assert_eq!("0024E40ABCFG".parse::<MacAddress>(), Err(SerialError::Digit('G')));
    assert_eq!("0024E40ABCFé".parse::<MacAddress>(), Err(SerialError::Digit('é')));
}

#[test]
fn unit_preferences() {
    assert_eq!("kg".parse::<WeightUnit>(), Ok(WeightUnit::Kilograms));
    assert_eq!(" LBS ".parse::<WeightUnit>(), Ok(WeightUnit::Pounds));
    assert_eq!("Stones".parse::<WeightUnit>(), Ok(WeightUnit::Stones));
    assert!("grams".parse::<WeightUnit>().is_err());

    assert_eq!(WeightUnit::from_preference("grams"), WeightUnit::Kilograms);
    assert_eq!(WeightUnit::from_preference("lbs"), WeightUnit::Pounds);

    assert_eq!(WeightUnit::Pounds as u32, 0);
    assert_eq!(WeightUnit::Stones as u32, 1);
    assert_eq!(WeightUnit::Kilograms as u32, 2);
}

#[test]
fn profile_names() {
    assert_eq!(ProfileName::from("Ada").as_str(), "Ada");
    assert_eq!(ProfileName::from("").as_str(), "");
    assert_eq!(&ProfileName::from("Ada").as_bytes()[..4], b"Ada\0");

    // 'ö' is two bytes, so the 20 byte limit splits the last one.
    let name = ProfileName::from("aöööööööööö");
    assert_eq!(name.as_bytes()[19], 0xC3);
    assert_eq!(name.as_str(), "aööööööööö");
}

#[test]
fn profile_from_metric() {
    let user = UserProfile::from_metric(4, "Lin", 172, 41, Gender::Female, 45.5, 95.0).unwrap();

    assert_eq!(user.user_id, 4);
    assert_eq!(user.name.as_str(), "Lin");
    assert_eq!(user.height_mm, 1_720);
    assert_eq!(user.min_weight_grams, 45_500);
    assert_eq!(user.max_weight_grams, 95_000);
    assert_eq!(user.gender, Gender::Female);
    assert_eq!(user.last_weight_grams, 0);
    assert_eq!(user.last_timestamp, 0);
}

#[test]
fn profile_from_metric_rejects() {
    let create = |name, height_cm, age, min, max| {
        UserProfile::from_metric(1, name, height_cm, age, Gender::Male, min, max)
    };

    assert_eq!(create("", 172, 41, 30.0, 150.0), Err(ProfileError::NameLength(0)));
    assert_eq!(
        create("A name far too long!!", 172, 41, 30.0, 150.0),
        Err(ProfileError::NameLength(21))
    );
    assert_eq!(create("Lin", 49, 41, 30.0, 150.0), Err(ProfileError::Height(49)));
    assert_eq!(create("Lin", 172, 0, 30.0, 150.0), Err(ProfileError::Age(0)));
    assert_eq!(
        create("Lin", 172, 41, 150.0, 150.0),
        Err(ProfileError::WeightRange {
            min: 150.0,
            max: 150.0
        })
    );
    assert!(create("Lin", 172, 41, 5.0, 150.0).is_err());
    assert!(create("Lin", 172, 41, 30.0, 501.0).is_err());
}

#[test]
fn profile_name_limit_counts_characters() {
    const NAME: &str = "Zoë Øster-Ünderhållé";
    assert_eq!(NAME.chars().count(), 20);
    assert_eq!(NAME.len(), 25);

    let user = UserProfile::from_metric(1, NAME, 170, 30, Gender::Male, 30.0, 150.0).unwrap();
    assert_eq!(user.name.as_bytes()[..], NAME.as_bytes()[..20]);
    assert_eq!(user.name.as_str(), "Zoë Øster-Ünderh");

    let longer = "Zoë Øster-Ünderhållén";
    assert_eq!(
        UserProfile::from_metric(1, longer, 170, 30, Gender::Male, 30.0, 150.0),
        Err(ProfileError::NameLength(21))
    );
}
