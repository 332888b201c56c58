use serde::{Deserialize, Serialize};

/// The `{data, message, status}` wrapper every backend response uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,

    #[serde(default)]
    pub message: String,

    #[serde(default, alias = "statusCode")]
    pub status: u16,
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_with_status() {
        let env: Envelope<Vec<i64>> =
            serde_json::from_str(r#"{"data":[1,2],"message":"ok","status":200}"#).unwrap();
        assert_eq!(env.data, Some(vec![1, 2]));
        assert_eq!(env.message, "ok");
        assert_eq!(env.status, 200);
    }

    #[test]
    fn test_decode_status_code_alias() {
        let env: Envelope<bool> =
            serde_json::from_str(r#"{"statusCode":201,"message":"created","data":true}"#)
                .unwrap();
        assert_eq!(env.status, 201);
        assert_eq!(env.into_data(), Some(true));
    }

    #[test]
    fn test_decode_missing_data() {
        let env: Envelope<Vec<i64>> =
            serde_json::from_str(r#"{"statusCode":200,"message":"Task deleted successfully"}"#)
                .unwrap();
        assert!(env.data.is_none());
    }

    #[test]
    fn test_decode_null_data() {
        let env: Envelope<Vec<i64>> = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(env.data.is_none());
        assert_eq!(env.message, "");
        assert_eq!(env.status, 0);
    }
}
