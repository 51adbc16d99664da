use crate::survey::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use std::collections::BTreeMap;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "surveyName")]
    pub survey_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct InputSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ScaleSettings {
    pub labels: Vec<String>,
    #[serde(rename = "negativeCount")]
    pub negative_count: usize,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "inputSource")]
    pub input_source: InputSource,
    /// Source headers of the demographic columns, by column key.
    #[serde(rename = "demographicColumns")]
    pub demographic_columns: Option<BTreeMap<String, String>>,
    pub scale: Option<ScaleSettings>,
    pub filters: Option<BTreeMap<String, Vec<String>>>,
    pub question: Option<String>,
}

impl ReportConfig {
    pub fn demographic_headers(&self) -> SurveyResult<DemographicHeaders> {
        let mut headers = DemographicHeaders::default();
        for (key, header) in self.demographic_columns.iter().flatten() {
            let column = DemographicColumn::ALL
                .iter()
                .find(|c| c.key() == key.as_str())
                .cloned()
                .context(UnknownDemographicKeySnafu { key })?;
            headers = headers.with_header(column, header);
        }
        headers.validate().context(EngineSnafu {})?;
        Ok(headers)
    }

    pub fn scale(&self) -> SurveyResult<LikertScale> {
        match &self.scale {
            Some(s) => LikertScale::new(&s.labels, s.negative_count).context(EngineSnafu {}),
            None => Ok(LikertScale::default()),
        }
    }
}

pub fn read_config(path: &str) -> SurveyResult<ReportConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ReportConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config() {
        let js = r#"{
            "outputSettings": {"surveyName": "Anket"},
            "inputSource": {"provider": "xlsx", "filePath": "anket.xlsx"}
        }"#;
        let config: ReportConfig = serde_json::from_str(js).unwrap();
        assert_eq!(config.output_settings.survey_name, "Anket");
        assert_eq!(config.input_source.excel_worksheet_name, None);
        assert_eq!(
            config.demographic_headers().unwrap(),
            DemographicHeaders::default()
        );
        assert_eq!(config.scale().unwrap(), LikertScale::default());
    }

    #[test]
    fn full_config() {
        let js = r#"{
            "outputSettings": {"surveyName": "Anket", "outputDirectory": "out"},
            "inputSource": {"provider": "xlsx", "filePath": "anket.xlsx", "excelWorksheetName": "Form1"},
            "demographicColumns": {"department": "Birim"},
            "scale": {"labels": ["Evet", "Hayır"], "negativeCount": 1},
            "filters": {"Departman": ["IT"]},
            "question": "S1"
        }"#;
        let config: ReportConfig = serde_json::from_str(js).unwrap();
        let headers = config.demographic_headers().unwrap();
        assert_eq!(headers.header(DemographicColumn::Department), "Birim");
        assert_eq!(
            headers.header(DemographicColumn::Gender),
            "1.Cinsiyetiniz nedir?"
        );
        let scale = config.scale().unwrap();
        assert!(scale.is_negative("Hayır"));
        assert_eq!(config.question, Some("S1".to_string()));
    }

    #[test]
    fn bad_column_key() {
        let js = r#"{
            "outputSettings": {"surveyName": "Anket"},
            "inputSource": {"provider": "csv", "filePath": "anket.csv"},
            "demographicColumns": {"city": "Şehir"}
        }"#;
        let config: ReportConfig = serde_json::from_str(js).unwrap();
        assert!(matches!(
            config.demographic_headers(),
            Err(SurveyError::UnknownDemographicKey { .. })
        ));
    }

    #[test]
    fn shared_column_header() {
        let js = r#"{
            "outputSettings": {"surveyName": "Anket"},
            "inputSource": {"provider": "csv", "filePath": "anket.csv"},
            "demographicColumns": {"department": "1.Cinsiyetiniz nedir?"}
        }"#;
        let config: ReportConfig = serde_json::from_str(js).unwrap();
        assert!(matches!(
            config.demographic_headers(),
            Err(SurveyError::Engine {
                source: EngineErrors::DemographicHeaderConflict(_)
            })
        ));
    }
}
