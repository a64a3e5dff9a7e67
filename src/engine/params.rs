use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::path::Path;

/// Keys the engine needs for a complete run. A configuration missing any of
/// these is rejected before the executable is launched.
pub const REQUIRED_KEYS: &[&str] = &[
    "OSOAA.ResRoot",
    "OSOAA.Wa",
    "ANG.Thetas",
    "OSOAA.View.Phi",
    "OSOAA.View.Level",
    "OSOAA.View.Z",
    "AP.Pressure",
    "AP.HR",
    "AP.HA",
    "AER.DirMie",
    "AER.Waref",
    "AER.AOTref",
    "AER.Model",
    "AER.MMD.MRwa",
    "AER.MMD.MIwa",
    "AER.MMD.SDtype",
    "AER.MMD.LNDradius",
    "AER.MMD.LNDvar",
    "SEA.Depth",
    "HYD.DirMie",
    "HYD.Model",
    "PHYTO.Chl",
    "PHYTO.ProfilType",
    "PHYTO.JD.slope",
    "PHYTO.JD.rmin",
    "PHYTO.JD.rmax",
    "PHYTO.JD.MRwa",
    "PHYTO.JD.MIwa",
    "PHYTO.JD.rate",
    "SED.Csed",
    "YS.Abs440",
    "DET.Abs440",
    "SEA.Dir",
    "SEA.Ind",
    "SEA.Wind",
    "SEA.SurfAlb",
    "SEA.BotType",
    "SEA.BotAlb",
    "OSOAA.ResFile.vsVZA",
];

pub const RES_ROOT: &str = "OSOAA.ResRoot";
pub const WAVELENGTH: &str = "OSOAA.Wa";
pub const VZA_FILE: &str = "OSOAA.ResFile.vsVZA";

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Float(f64),
    Int(i64),
    Text(String),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

// Plain decimal form: no precision is imposed on floats.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<&Path> for ParamValue {
    fn from(v: &Path) -> Self {
        ParamValue::Text(v.to_string_lossy().into_owned())
    }
}

/// Ordered key/value configuration handed to the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfiguration {
    entries: Vec<(String, ParamValue)>,
}

// Serialized as a JSON object in insertion order.
impl Serialize for EngineConfiguration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl EngineConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `key`, or replaces its value in place if it is already set.
    pub fn set<V: Into<ParamValue>>(&mut self, key: &str, value: V) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Required keys that are not set, in [`REQUIRED_KEYS`] order.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !self.contains(key))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_keys().is_empty()
    }

    pub fn result_root(&self) -> Option<&str> {
        self.get(RES_ROOT).and_then(ParamValue::as_str)
    }

    pub fn vza_file(&self) -> Option<&str> {
        self.get(VZA_FILE).and_then(ParamValue::as_str)
    }

    /// Simulation wavelength converted back to nm.
    pub fn wavelength_nm(&self) -> Option<f64> {
        self.get(WAVELENGTH)
            .and_then(ParamValue::as_f64)
            .map(|um| um * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_preserves_insertion_order() {
        let mut config = EngineConfiguration::new();
        config.set("B.key", 1.5);
        config.set("A.key", 2_i64);
        config.set("C.key", "file.txt");

        let keys: Vec<&str> = config.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["B.key", "A.key", "C.key"]);
    }

    #[test]
    fn test_set_replaces_existing_value_in_place() {
        let mut config = EngineConfiguration::new();
        config.set("A", 1.0);
        config.set("B", 2.0);
        config.set("A", 3.0);

        assert_eq!(config.len(), 2);
        assert_eq!(config.get("A"), Some(&ParamValue::Float(3.0)));
        assert_eq!(config.iter().next().map(|(k, _)| k), Some("A"));
    }

    #[test]
    fn test_missing_keys_on_empty_configuration() {
        let config = EngineConfiguration::new();
        let missing = config.missing_keys();

        assert!(!config.is_complete());
        assert!(missing.contains(&"OSOAA.Wa"));
        assert!(missing.contains(&"SEA.Dir"));
        assert_eq!(missing.len(), REQUIRED_KEYS.len());
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(ParamValue::Float(0.55).to_string(), "0.55");
        assert_eq!(ParamValue::Float(1013.0).to_string(), "1013");
        assert_eq!(ParamValue::Float(-0.001).to_string(), "-0.001");
        assert_eq!(ParamValue::Int(4).to_string(), "4");
        assert_eq!(ParamValue::from("LUM_vsVZA.txt").to_string(), "LUM_vsVZA.txt");
    }

    #[test]
    fn test_wavelength_round_trip() {
        let mut config = EngineConfiguration::new();
        config.set(WAVELENGTH, 0.443);
        let nm = config.wavelength_nm().unwrap();
        assert!((nm - 443.0).abs() < 1e-9);
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let mut config = EngineConfiguration::new();
        config.set("Z.last", 1_i64);
        config.set("A.first", 0.5);
        config.set("M.text", "x.txt");

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"Z.last":1,"A.first":0.5,"M.text":"x.txt"}"#);
    }
}
