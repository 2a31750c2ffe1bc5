/*!

This is the long-form manual for `survey_tally` and `survtab`.

## Input

One sheet, with the names of the fields in the first row and one respondent per
following row. The following formats are supported:
* `xlsx` Excel workbooks, as exported by most online form tools. The worksheet is
  selected with `--worksheet`; without it, the only worksheet (or the first one) is used.
* `csv` Comma Separated Values with a header row.

Blank cells are missing answers. Excel dates are shown as `2024-05-01 10:00:00`. Multiple-choice answers list the selected options in
one cell, separated by `|`:

```text
참여자,선호 시간대(최대 2개 선택),만족도
kim,아침|저녁,좋음
lee,저녁,보통
```

## Processing

1. **Test responses** are removed: a row whose contact field contains one of the
   exclusion keywords (case sensitive) is dropped. Nothing happens if the sheet has no
   contact field.
2. **Questions** are all the columns except the metadata columns. They are numbered
   from 1 in column order and titled `Q{n}. {column}`, replacing any `Q<number>.` label
   the column already had.
3. **Question types** are decided in this order:
   - free text, if the title contains the contact marker (`연락처`) or one of the
     open-ended hints (`적어`, `순서대로`, `떠올려`, `사례`, `문의/불만`, `기준`,
     `어떻게`), or if the answers are longer than 80 characters on average;
   - multiple choice, if the title contains the selection marker (`최대`) or any answer
     contains `|`;
   - single choice otherwise.
4. **Counting**: choice answers are trimmed and counted by decreasing frequency. Every
   option of a multiple-choice answer counts, so the total can exceed the number of
   respondents. Missing answers are ignored unless blank answers are requested, in
   which case they count under `Blank` (once per respondent for multiple choice).
   Free-text answers are listed instead.
5. **Display**: charts keep the `top_n` (3 to 15, default 8) most frequent answers and
   group the others under `Other`. The statistics table always has the exact counts.
   Percentages are rounded to 2 decimals.

## Configuration

`survtab` comes with defaults for all the options. They can be changed with a JSON file
passed with `--config`. All the keys are optional:

```json
{
  "metaColumns": ["참여자", "응답일시"],
  "contactColumn": "연락처(이메일/전화번호)",
  "excludeContactKeywords": ["test", "테스트"],
  "respondentColumn": "참여자",
  "includeBlank": false,
  "topN": 8,
  "contactMarker": "연락처",
  "textHints": ["적어", "사례"],
  "multiSelectMarker": "최대",
  "longTextThreshold": 80,
  "worksheetName": "Form1"
}
```

The command line flags take precedence over the configuration file.

## Respondents

`--list-respondents` prints the identifiers found in the respondent column, test
responses excluded. `--respondent <id>` adds the answers of one respondent (found in the respondent
column) to the output. Missing answers are shown as `(no response)`. If several rows
have the same identifier, the first one is used.

 */
