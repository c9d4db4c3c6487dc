/*!

This is the long-form manual for `answer_key` and `answer-remap`.

## Preparing the spreadsheet

The tool is meant for quizzes collected with Google Forms or Microsoft Forms.

1. Download the responses as an Excel (.xlsx) file.
2. Delete every column except the full name (first column), the class (second column)
   and the answer columns.
3. In the first row, replace the text of every question with the text of its correct
   answer (the answer itself, not the option letter).
4. Run `answer-remap` on the file.

The expected layout:

|  Name  | Class | Paris  | 1969 | Mercury |
|--------|-------|--------|------|---------|
| Alice  | X     | Paris  | 1969 | Venus   |
| Bob    | Y     | London | 1969 |         |

Only the first worksheet is read.

## What the output contains

For every question column, the correct answer receives a random code between `A` and
`E`. The other answers receive the four remaining codes in order of first appearance.
Codes are drawn again for every run unless a seed is given.

|  Name  | Class | C | A | E | CAE | NILAI |
|--------|-------|---|---|---|-----|-------|
| Alice  | X     | C | A | A | CAA | 2/3   |
| Bob    | Y     | A | A |   | AA  | 1/2   |

- the header row holds the code of every correct answer, the concatenated answer key
  and the label of the score column;
- every respondent row holds the codes of the answers, the concatenated codes, and the
  number of correct answers out of the number of answered questions.

Blank answers stay blank and do not count in the total.

A question with more than four distinct wrong answers runs out of codes. By default the
codes are reused (the fifth wrong answer gets the code of the first one) and a warning
is logged. Use `--strict-codes` or `"codeOverflow": "reject"` to fail instead.

The output worksheet is named `Processed Data`, columns are sized to their content,
and the file is named after the current time, for instance `ANABUT_2024-05-01T1230.xlsx`.

## Command line

```bash
answer-remap -i responses.xlsx -o results/
answer-remap -i responses.xlsx --seed 42 --score-label SCORE
```

## Configuration file

All the entries are optional. Relative paths are relative to the configuration file.

```json
{
  "inputFile": "responses.xlsx",
  "outputDirectory": "results",
  "outputPrefix": "ANABUT",
  "sheetName": "Processed Data",
  "includeKeyColumn": true,
  "scoreLabel": "NILAI",
  "randomSeed": 42,
  "codeOverflow": "wrap"
}
```

```bash
answer-remap -c remap.json
```

*/
