/*!

This is the long-form manual for `likert_engine` and `likertrpt`.

## Input formats

The survey is a table with one row per respondent. The first row holds the
column names. The following formats are supported:
* `xlsx` Excel workbook, as exported by Microsoft Forms or Google Forms
* `csv` Comma Separated Values

### `xlsx`

The first worksheet is used when the workbook has only one. Otherwise the name
of the worksheet must be given with `--excel-worksheet-name` (or
`excelWorksheetName` in the configuration file). Numbers are read as text
(`5.0` becomes `5`), cells formatted as dates are read as `2023-07-16` (or
`2023-07-16 12:00:00` with a time of day), empty cells are missing answers.

### `csv`

```text
1.Cinsiyetiniz nedir?,2. Yaş aralığınız nedir?,3.Şirkette ne kadar süredir çalışıyorsunuz?,Pozisyon grubunuz nedir?,Departmanınız nedir?,Yöneticime güveniyorum
Kadın,25-34,1-3 yıl,Uzman,IT,Katılıyorum
Erkek,35-44,3-5 yıl,Yönetici,Finans,Kararsızım
```

Rows may be shorter than the header: the missing cells are missing answers.

## Columns

Five columns are demographic columns and are only used for filtering:

| key          | label            | default header                                  |
|--------------|------------------|-------------------------------------------------|
| `gender`     | `Cinsiyet`       | `1.Cinsiyetiniz nedir?`                         |
| `age`        | `Yaş Aralığı`    | `2. Yaş aralığınız nedir?`                      |
| `tenure`     | `Çalışma Süresi` | `3.Şirkette ne kadar süredir çalışıyorsunuz?`   |
| `position`   | `Pozisyon`       | `Pozisyon grubunuz nedir?`                      |
| `department` | `Departman`      | `Departmanınız nedir?`                          |

Headers are matched verbatim. All the other columns are questions. Each
column needs its own header, which must not be the key or the label of another
column.

## Answers

The answers are matched exactly against the scale:
`Kesinlikle Katılıyorum`, `Katılıyorum`, `Kararsızım`, `Katılmıyorum`,
`Kesinlikle Katılmıyorum`. The last three are negative answers.

Anything else (blank cells, free text, different spelling) is left out of
both the counts and the totals. Percentages are rounded to 2 decimals, half
up (`1/32` gives `3.13`).

## Filters

`--filter KEY=VALUE` keeps the respondents with this value. The key is the
column key, its label or its header. Several values for the same key are
alternatives; different keys must all match. Respondents without a value in a
filtered column are dropped. A column filtered on the command line ignores the
values given for it in the configuration file.

## Configuration

```json
{
  "outputSettings": { "surveyName": "Çalışan Deneyimi Anketi" },
  "inputSource": { "provider": "xlsx", "filePath": "anket.xlsx" },
  "demographicColumns": { "department": "Birim" },
  "scale": {
    "labels": ["Kesinlikle Katılıyorum", "Katılıyorum", "Kararsızım", "Katılmıyorum", "Kesinlikle Katılmıyorum"],
    "negativeCount": 3
  },
  "filters": { "department": ["IT", "Finans"] },
  "question": "Yöneticime güveniyorum"
}
```

Only `outputSettings` and `inputSource` are required. Options passed on the
command line take precedence.

 */
